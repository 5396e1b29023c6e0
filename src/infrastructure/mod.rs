// Infrastructure layer - Configuration and external response shapes
pub mod config;
pub mod response_mapper;
