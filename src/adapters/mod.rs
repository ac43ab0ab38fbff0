// Adapters layer: concrete implementations for external systems (document tree, files).

pub mod storage;
pub mod xpath;
