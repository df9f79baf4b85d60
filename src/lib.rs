//! Library exports for reuse in benchmarks and tests.
/// Platform-specific application directories.
pub mod app_dirs;
/// Library browser panel model.
pub mod browser;
/// Persisted settings.
pub mod config;
/// Application controller driving the UI.
pub mod controller;
/// Headless dialog controllers.
pub mod dialogs;
/// Drumkit descriptors, listing and persistence.
pub mod drumkit;
/// `.h2drumkit` archive export.
pub mod export;
mod fs_util;
/// Logging setup.
pub mod logging;
/// Live session state.
pub mod session;
/// egui renderer.
pub mod ui;
