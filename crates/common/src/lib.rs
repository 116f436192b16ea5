//! Shared types and configuration for the cubeview workspace.
//!
//! # Invariants
//! - Every configuration field has a default; an empty file is a valid config.
//! - Loaded configuration is validated before any window or device exists.

pub mod config;
pub mod types;

pub use config::{CameraConfig, ConfigError, RenderConfig, ViewerConfig, WindowConfig};
pub use types::Transform;

pub fn crate_info() -> &'static str {
    "cubeview-common v0.1.0"
}
