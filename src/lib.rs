//! Library exports for the NAGAR AI desktop client and its tests.
/// Client for the remote issue analysis service.
pub mod analysis_api;
/// Per-user application directories.
pub mod app_dirs;
/// TOML-backed application settings.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Bounded HTTP helpers shared by service clients.
pub mod http_client;
/// Tracing setup for stdout and rotating log files.
pub mod logging;
