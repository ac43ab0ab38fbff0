pub mod date;
pub mod engine;
pub mod feed;
pub mod grouping;
pub mod note;
pub mod price;
pub mod text;
pub mod writer;
