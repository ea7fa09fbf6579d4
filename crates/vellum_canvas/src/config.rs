//! Motion configuration
//!
//! Loaded once at startup and handed to `MotionStage::new`. Every field has a
//! default, so a config file only needs the values it overrides:
//!
//! ```toml
//! animations_enabled = true
//! poll_interval_ms = 16
//!
//! [default_animation]
//! duration_ms = 400
//! easing = "ease_out"
//! ```
//!
//! Easing names are snake_case (`linear`, `ease_in_out`, `back_out`, ...). A
//! custom curve is written as `easing = { cubic_bezier = [0.25, 0.1, 0.25, 1.0] }`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use vellum_animation::Animation;

use crate::error::ConfigError;

/// Longest accepted frame-loop poll interval
pub const MAX_POLL_INTERVAL_MS: u64 = 1000;

/// Stage-wide motion settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// When false every property jumps straight to its target
    pub animations_enabled: bool,
    /// Transition given to drawables added to the stage
    pub default_animation: Animation,
    /// How often the frame loop checks the canvas dirty flag
    pub poll_interval_ms: u64,
    /// When false, antialiasing is turned off for every paint on the stage
    pub antialias: bool,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            animations_enabled: true,
            default_animation: Animation::default(),
            poll_interval_ms: 16,
            antialias: true,
        }
    }
}

impl MotionConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: MotionConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded motion config from {}", path.display());
        Ok(config)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 || self.poll_interval_ms > MAX_POLL_INTERVAL_MS {
            return Err(ConfigError::Invalid(format!(
                "poll_interval_ms must be within 1..={}, got {}",
                MAX_POLL_INTERVAL_MS, self.poll_interval_ms
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_animation::Easing;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = MotionConfig::from_toml_str("").unwrap();
        assert_eq!(config, MotionConfig::default());
        assert_eq!(config.poll_interval(), Duration::from_millis(16));
    }

    #[test]
    fn test_partial_override() {
        let config = MotionConfig::from_toml_str(
            r#"
            animations_enabled = false
            antialias = false

            [default_animation]
            duration_ms = 250
            easing = "ease_out"
            "#,
        )
        .unwrap();

        assert!(!config.animations_enabled);
        assert!(!config.antialias);
        assert_eq!(config.default_animation.duration_ms, 250);
        assert_eq!(config.default_animation.easing, Easing::EaseOut);
        assert_eq!(config.default_animation.repeat, 0);
        assert_eq!(config.poll_interval_ms, 16);
    }

    #[test]
    fn test_every_easing_name() {
        let names = [
            ("linear", Easing::Linear),
            ("ease_in", Easing::EaseIn),
            ("ease_out", Easing::EaseOut),
            ("ease_in_out", Easing::EaseInOut),
            ("ease_in_quad", Easing::EaseInQuad),
            ("ease_out_quad", Easing::EaseOutQuad),
            ("ease_in_cubic", Easing::EaseInCubic),
            ("ease_out_cubic", Easing::EaseOutCubic),
            ("back_out", Easing::BackOut),
            ("bounce_out", Easing::BounceOut),
            ("elastic_out", Easing::ElasticOut),
        ];
        for (name, expected) in names {
            let config = MotionConfig::from_toml_str(&format!(
                "[default_animation]\nduration_ms = 100\neasing = \"{}\"",
                name
            ))
            .unwrap();
            assert_eq!(config.default_animation.easing, expected, "{}", name);
        }

        let config = MotionConfig::from_toml_str(
            "[default_animation]\nduration_ms = 100\neasing = { cubic_bezier = [0.25, 0.1, 0.25, 1.0] }",
        )
        .unwrap();
        assert_eq!(config.default_animation.easing, Easing::EASE);
    }

    #[test]
    fn test_camel_case_easing_rejected() {
        assert!(matches!(
            MotionConfig::from_toml_str("[default_animation]\nduration_ms = 100\neasing = \"EaseOut\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_invalid_poll_interval() {
        assert!(matches!(
            MotionConfig::from_toml_str("poll_interval_ms = 0"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            MotionConfig::from_toml_str("animations_enabled = \"yes\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            MotionConfig::load("/nonexistent/vellum/motion.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}
