// Domain layer - Chart value objects
pub mod alert;
pub mod availability;
pub mod bounds;
pub mod sample;
pub mod series;
