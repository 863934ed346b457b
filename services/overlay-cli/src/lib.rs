//! Command-line front end for the raster overlay engine.

pub mod commands;
pub mod config;

pub use config::OverlaySettings;
