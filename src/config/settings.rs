//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::geometry::{Tessellation, MIN_MESH_TOLERANCE};

/// Root configuration structure.
///
/// This is the top-level structure that matches the JSON config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// Path to the YannLib library root (the directory holding
    /// `YannLib.pretty` and `YannLib.3dmodels`).
    #[serde(default)]
    pub library_path: Option<PathBuf>,

    /// Curve approximation settings.
    #[serde(default)]
    pub tessellation: TessellationConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tessellation.arc_segments == 0 {
            return Err(ConfigError::ValidationError {
                message: "tessellation.arc_segments must be at least 1".to_string(),
            });
        }
        let tolerance = self.tessellation.mesh_tolerance;
        if !(tolerance.is_finite() && tolerance >= MIN_MESH_TOLERANCE) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "tessellation.mesh_tolerance must be at least {MIN_MESH_TOLERANCE}, got {tolerance}"
                ),
            });
        }
        Ok(())
    }

    /// Tessellation settings for the geometry builders.
    #[must_use]
    pub const fn tessellation(&self) -> Tessellation {
        Tessellation::new(
            self.tessellation.arc_segments,
            self.tessellation.mesh_tolerance,
        )
    }
}

/// Curve approximation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TessellationConfig {
    /// Ruled bands per quarter arc of a top fillet.
    #[serde(default = "default_arc_segments")]
    pub arc_segments: usize,

    /// Chord tolerance (mm) for meshing B-reps during boolean operations
    /// and volume checks. Curves in the STEP output stay exact.
    #[serde(default = "default_mesh_tolerance")]
    pub mesh_tolerance: f64,
}

impl Default for TessellationConfig {
    fn default() -> Self {
        Self {
            arc_segments: default_arc_segments(),
            mesh_tolerance: default_mesh_tolerance(),
        }
    }
}

const fn default_arc_segments() -> usize {
    Tessellation::DEFAULT.arc_segments
}

const fn default_mesh_tolerance() -> f64 {
    Tessellation::DEFAULT.mesh_tolerance
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let json = r"{}";
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert!(config.library_path.is_none());
        assert_eq!(config.tessellation(), Tessellation::default());
    }

    #[test]
    fn parse_full_config() {
        let json = r#"{
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "_comment": "Test config",
            "library_path": "/path/to/board/libs/YannLib",
            "tessellation": {
                "arc_segments": 4,
                "mesh_tolerance": 0.005
            },
            "logging": {
                "level": "debug"
            }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.library_path,
            Some(PathBuf::from("/path/to/board/libs/YannLib"))
        );
        assert_eq!(config.tessellation(), Tessellation::new(4, 0.005));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn tessellation_config_defaults() {
        let config = TessellationConfig::default();
        assert_eq!(config.arc_segments, 8);
        assert!((config.mesh_tolerance - 0.01).abs() < f64::EPSILON);
    }

    #[test]
    fn logging_config_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "warn");
    }

    #[test]
    fn reject_zero_arc_segments() {
        let json = r#"{ "tessellation": { "arc_segments": 0 } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_unusable_mesh_tolerance() {
        for tolerance in ["0.0", "-0.01", "1e-9"] {
            let json = format!(r#"{{ "tessellation": {{ "mesh_tolerance": {tolerance} }} }}"#);
            let config: Config = serde_json::from_str(&json).unwrap();
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("mesh_tolerance"));
        }
    }

    #[test]
    fn unknown_tessellation_field_rejected() {
        let json = r#"{ "tessellation": { "circle_segments": 64 } }"#;
        assert!(serde_json::from_str::<Config>(json).is_err());
    }

    #[test]
    fn reject_unknown_fields() {
        let json = r#"{
            "unknown_field": "value"
        }"#;

        let result: Result<Config, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
