// Presentation layer - HTTP surface for the render pipeline
pub mod app_state;
pub mod handlers;
