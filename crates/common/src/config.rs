//! Viewer configuration.
//!
//! Stored as JSON. Every field is optional in the file; missing fields take
//! the defaults below, which reproduce the stock viewer.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors from loading or validating a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Top-level viewer configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "cubeview".into(),
            width: 800,
            height: 600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting eye position in world units.
    pub initial_position: [f32; 3],
    /// Units per second for keyboard movement.
    pub move_speed: f32,
    /// Degrees of yaw/pitch per pixel of cursor travel.
    pub mouse_sensitivity: f32,
    /// Re-arm first-sample suppression whenever the window regains focus.
    pub rearm_on_focus: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            initial_position: [0.0, 0.0, 3.0],
            move_speed: 2.5,
            mouse_sensitivity: 0.1,
            rearm_on_focus: true,
        }
    }
}

impl CameraConfig {
    pub fn initial_position(&self) -> Vec3 {
        Vec3::from_array(self.initial_position)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub clear_color: [f32; 4],
    /// Base and overlay texture paths. Empty selects the built-in textures.
    pub textures: Vec<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.2, 0.3, 0.3, 1.0],
            textures: Vec::new(),
        }
    }
}

impl ViewerConfig {
    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded viewer config");
        Ok(config)
    }

    /// Load `path` if given, otherwise fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Write the configuration as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Fixed projection aspect ratio derived from the configured window size.
    pub fn aspect_ratio(&self) -> f32 {
        self.window.width as f32 / self.window.height as f32
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid {
                field: "window",
                reason: format!(
                    "size must be non-zero, got {}x{}",
                    self.window.width, self.window.height
                ),
            });
        }
        if !(self.camera.move_speed.is_finite() && self.camera.move_speed > 0.0) {
            return Err(ConfigError::Invalid {
                field: "camera.move_speed",
                reason: format!("must be positive, got {}", self.camera.move_speed),
            });
        }
        if !(self.camera.mouse_sensitivity.is_finite() && self.camera.mouse_sensitivity > 0.0) {
            return Err(ConfigError::Invalid {
                field: "camera.mouse_sensitivity",
                reason: format!("must be positive, got {}", self.camera.mouse_sensitivity),
            });
        }
        if self.camera.initial_position.iter().any(|c| !c.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "camera.initial_position",
                reason: "components must be finite".into(),
            });
        }
        if self.render.textures.len() > 2 {
            return Err(ConfigError::Invalid {
                field: "render.textures",
                reason: format!("at most two textures, got {}", self.render.textures.len()),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_stock_viewer() {
        let config = ViewerConfig::default();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.camera.initial_position(), Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(config.camera.move_speed, 2.5);
        assert_eq!(config.camera.mouse_sensitivity, 0.1);
        assert!(config.camera.rearm_on_focus);
        assert_eq!(config.render.clear_color, [0.2, 0.3, 0.3, 1.0]);
        assert!(config.render.textures.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, r#"{{ "camera": {{ "move_speed": 5.0 }} }}"#).unwrap();

        let config = ViewerConfig::load(tmp.path()).unwrap();
        assert_eq!(config.camera.move_speed, 5.0);
        assert_eq!(config.camera.mouse_sensitivity, 0.1);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn save_and_load() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let mut config = ViewerConfig::default();
        config.window.title = "boxes".into();
        config.render.textures = vec!["a.png".into(), "b.jpg".into()];
        config.save(tmp.path()).unwrap();

        let loaded = ViewerConfig::load(tmp.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn rejects_zero_window() {
        let mut config = ViewerConfig::default();
        config.window.height = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "window", .. })
        ));
    }

    #[test]
    fn rejects_non_positive_speed() {
        let mut config = ViewerConfig::default();
        config.camera.move_speed = 0.0;
        assert!(config.validate().is_err());
        config.camera.move_speed = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_too_many_textures() {
        let mut config = ViewerConfig::default();
        config.render.textures = vec!["a".into(), "b".into(), "c".into()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ViewerConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn malformed_file_is_json_error() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, "{{ not json").unwrap();
        let err = ViewerConfig::load(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn load_or_default_without_path() {
        assert_eq!(
            ViewerConfig::load_or_default(None).unwrap(),
            ViewerConfig::default()
        );
    }

    #[test]
    fn aspect_ratio_from_window() {
        let config = ViewerConfig::default();
        assert!((config.aspect_ratio() - 800.0 / 600.0).abs() < 1e-6);
    }
}
