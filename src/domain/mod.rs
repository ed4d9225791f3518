// Domain layer: the card record and the ports the pipeline talks through.

pub mod model;
pub mod ports;
