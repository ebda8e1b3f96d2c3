// Domain layer: request-scoped models and the two upstream ports.

pub mod model;
pub mod ports;
