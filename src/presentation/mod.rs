// Presentation layer - HTTP handlers for the service, terminal UI for the viewer
pub mod app_state;
pub mod handlers;
pub mod viewer;
