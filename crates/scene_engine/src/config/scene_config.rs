//! # Scene Configuration
//!
//! Settings an application reads at startup: logging, the initial camera and
//! the window viewport. Every section has defaults, so a config file only
//! needs the values it changes.
//!
//! ```toml
//! [engine]
//! log_level = "debug"
//!
//! [camera]
//! position = [0.0, 0.0, 600.0]
//! fov_degrees = 70.0
//! far = 1000.0
//! ```

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::foundation::math::{Vec3, Viewport};

/// Crate-wide behavior settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default `env_logger` filter, e.g. `"info"` or `"scene_engine=debug"`
    pub log_level: String,
}

impl EngineConfig {
    /// Set the log level
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.log_level.trim().is_empty() {
            return Err("Log level cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Initial perspective camera
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye position
    pub position: [f32; 3],
    /// Point the camera looks at
    pub target: [f32; 3],
    /// Up direction
    pub up: [f32; 3],
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Width over height
    pub aspect: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
}

impl CameraConfig {
    /// Set the eye position
    #[must_use]
    pub const fn with_position(mut self, position: Vec3) -> Self {
        self.position = position.to_array();
        self
    }

    /// Set the look-at target
    #[must_use]
    pub const fn with_target(mut self, target: Vec3) -> Self {
        self.target = target.to_array();
        self
    }

    /// Set the vertical field of view in degrees
    #[must_use]
    pub const fn with_fov_degrees(mut self, fov_degrees: f32) -> Self {
        self.fov_degrees = fov_degrees;
        self
    }

    /// Set the aspect ratio
    #[must_use]
    pub const fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }

    /// Set the clip distances
    #[must_use]
    pub const fn with_clip_planes(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Eye position as a vector
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    /// Target as a vector
    #[must_use]
    pub const fn target(&self) -> Vec3 {
        Vec3::from_array(self.target)
    }

    /// Up direction as a vector
    #[must_use]
    pub const fn up(&self) -> Vec3 {
        Vec3::from_array(self.up)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(format!(
                "Field of view must be between 0 and 180 degrees, got {}",
                self.fov_degrees
            ));
        }
        if self.aspect <= 0.0 {
            return Err(format!("Aspect ratio must be positive, got {}", self.aspect));
        }
        if self.near <= 0.0 {
            return Err(format!("Near plane must be positive, got {}", self.near));
        }
        if self.far <= self.near {
            return Err(format!(
                "Far plane ({}) must be beyond the near plane ({})",
                self.far, self.near
            ));
        }
        if self.up().length_squared() <= 0.0 {
            return Err("Up vector cannot be zero".to_string());
        }
        if self.position == self.target {
            return Err("Camera position and target must differ".to_string());
        }
        Ok(())
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 3.0, 3.0],
            target: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            fov_degrees: 45.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Window rectangle used for projection to pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Left edge in pixels
    pub x: i32,
    /// Bottom edge in pixels
    pub y: i32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

impl ViewportConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.width <= 0 || self.height <= 0 {
            return Err(format!(
                "Viewport size must be positive, got {}x{}",
                self.width, self.height
            ));
        }
        Ok(())
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            width: 800,
            height: 600,
        }
    }
}

impl From<&ViewportConfig> for Viewport {
    fn from(config: &ViewportConfig) -> Self {
        Self::new(config.x, config.y, config.width, config.height)
    }
}

/// Top-level settings file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Logging and crate behavior
    pub engine: EngineConfig,
    /// Initial camera
    pub camera: CameraConfig,
    /// Output viewport
    pub viewport: ViewportConfig,
}

impl SceneConfig {
    /// Set the engine section
    #[must_use]
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Set the camera section
    #[must_use]
    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }

    /// Set the viewport section
    #[must_use]
    pub fn with_viewport(mut self, viewport: ViewportConfig) -> Self {
        self.viewport = viewport;
        self
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine
            .validate()
            .and_then(|()| self.camera.validate())
            .and_then(|()| self.viewport.validate())
            .map_err(ConfigError::Invalid)
    }
}

impl Config for SceneConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_are_valid() {
        let config = SceneConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.engine.log_level, "info");
        assert_eq!(Viewport::from(&config.viewport), Viewport::new(0, 0, 800, 600));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let text = r#"
            [engine]
            log_level = "debug"

            [camera]
            position = [0.0, 0.0, 600.0]
            fov_degrees = 70.0
        "#;
        let config = SceneConfig::from_toml_str(text).unwrap();
        assert_eq!(config.engine.log_level, "debug");
        assert_eq!(config.camera.position(), Vec3::new(0.0, 0.0, 600.0));
        assert_relative_eq!(config.camera.fov_degrees, 70.0);
        assert_relative_eq!(config.camera.near, 0.1);
        assert_eq!(config.viewport, ViewportConfig::default());
    }

    #[test]
    fn test_ron_parsing() {
        let text = "(viewport: (x: 0, y: 0, width: 1536, height: 960))";
        let config = SceneConfig::from_ron_str(text).unwrap();
        assert_eq!(config.viewport.width, 1536);
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = SceneConfig::from_toml_str("[camera]\nfov_degrees = \"wide\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let bad_clip = SceneConfig::default()
            .with_camera(CameraConfig::default().with_clip_planes(10.0, 1.0));
        assert!(matches!(bad_clip.validate(), Err(ConfigError::Invalid(_))));

        let bad_fov =
            SceneConfig::default().with_camera(CameraConfig::default().with_fov_degrees(180.0));
        assert!(bad_fov.validate().is_err());

        let bad_viewport = SceneConfig::default().with_viewport(ViewportConfig {
            width: 0,
            ..ViewportConfig::default()
        });
        assert!(bad_viewport.validate().is_err());

        let bad_level = SceneConfig::default().with_engine(EngineConfig::default().with_log_level(" "));
        assert!(bad_level.validate().is_err());

        let degenerate = CameraConfig::default().with_target(Vec3::new(0.0, 3.0, 3.0));
        assert!(degenerate.validate().is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = std::env::temp_dir().join(format!("scene_engine_config_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let config = SceneConfig::default()
            .with_engine(EngineConfig::default().with_log_level("trace"))
            .with_camera(CameraConfig::default().with_aspect(4.0 / 3.0));

        for name in ["scene.toml", "scene.ron"] {
            let path = dir.join(name);
            config.save_to_file(&path).unwrap();
            assert_eq!(SceneConfig::load_from_file(&path).unwrap(), config);
        }

        let unsupported = SceneConfig::load_from_file(dir.join("scene.json"));
        assert!(matches!(unsupported, Err(ConfigError::UnsupportedFormat(_))));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
