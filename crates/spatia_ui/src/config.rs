//! Panel configuration (spatia.toml)
//!
//! Every field is optional; missing values take the defaults below.
//!
//! ```toml
//! canvas_depth = 2.0
//! depth_plane_step = 0.1
//! animation_time = 0.15
//! dimmed_alpha = 0.4
//! head_tracking_speed = 4.0
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Layout and timing constants shared by canvases and buttons
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    /// Distance from the viewer to a canvas on plane 0, in meters
    pub canvas_depth: f32,
    /// Depth offset per depth plane, in meters
    pub depth_plane_step: f32,
    /// Duration of depth and fade transitions, in seconds
    pub animation_time: f64,
    /// Canvas opacity while interaction is disabled
    pub dimmed_alpha: f32,
    /// Follow rate for smooth head tracking, per second
    pub head_tracking_speed: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            canvas_depth: 2.0,
            depth_plane_step: 0.1,
            animation_time: 0.15,
            dimmed_alpha: 0.4,
            head_tracking_speed: 4.0,
        }
    }
}

impl UiConfig {
    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: UiConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values that would make depths or timings meaningless
    pub fn validate(&self) -> Result<()> {
        non_negative("canvas_depth", f64::from(self.canvas_depth))?;
        non_negative("depth_plane_step", f64::from(self.depth_plane_step))?;
        non_negative("animation_time", self.animation_time)?;
        non_negative("head_tracking_speed", f64::from(self.head_tracking_speed))?;

        if !(0.0..=1.0).contains(&self.dimmed_alpha) {
            return Err(ConfigError::Invalid {
                field: "dimmed_alpha",
                reason: format!("{} is outside 0.0..=1.0", self.dimmed_alpha),
            });
        }

        Ok(())
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("{value} is not finite"),
        });
    }
    if value < 0.0 {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("{value} is negative"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = UiConfig::from_toml_str("").unwrap();
        assert_eq!(config, UiConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = UiConfig::from_toml_str("animation_time = 0.3\ndimmed_alpha = 0.25\n").unwrap();
        assert_eq!(config.animation_time, 0.3);
        assert_eq!(config.dimmed_alpha, 0.25);
        assert_eq!(config.depth_plane_step, 0.1);
    }

    #[test]
    fn test_rejects_negative_duration() {
        let err = UiConfig::from_toml_str("animation_time = -1.0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "animation_time",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_alpha_out_of_range() {
        let err = UiConfig::from_toml_str("dimmed_alpha = 1.5").unwrap_err();
        assert!(err.to_string().contains("dimmed_alpha"));
    }

    #[test]
    fn test_rejects_unknown_field() {
        let err = UiConfig::from_toml_str("canvas_dept = 3.0").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_toml_round_trip_keeps_values() {
        let config = UiConfig {
            canvas_depth: 1.5,
            ..UiConfig::default()
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(UiConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = UiConfig::load(Path::new("/nonexistent/spatia.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/spatia.toml"));
    }
}
