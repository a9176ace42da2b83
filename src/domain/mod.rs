// Domain layer: relation records, feedback rows and the source port.

pub mod model;
pub mod ports;
