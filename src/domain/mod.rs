// Domain layer: route/price models and ports (interfaces).

pub mod model;
pub mod ports;
