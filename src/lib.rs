// Chart data pipeline - gap filling, auto-scaling and threshold bands
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
