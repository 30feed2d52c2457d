// Domain layer: records, client-facing views and ports (interfaces).

pub mod model;
pub mod ports;
pub mod views;
