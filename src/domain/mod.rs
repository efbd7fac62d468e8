// Domain layer - Pure turbine measurement models
pub mod curve;
pub mod query;
pub mod sample;
