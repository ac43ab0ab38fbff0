// Domain layer: menu model and the two seams (document queries, source profiles).

pub mod model;
pub mod ports;
