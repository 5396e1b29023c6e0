// Application layer - Render pipeline use cases
pub mod chart_service;
pub mod gap_filler;
pub mod multi_series;
pub mod range_bounds;
pub mod threshold;
