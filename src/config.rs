//! Tunable constants for the particle field.
//!
//! Every field has a default, so a JSON config only needs the keys it wants
//! to change:
//!
//! ```json
//! {
//!   "particle_count": 220,
//!   "connection_distance": 120.0,
//!   "seed": 7,
//!   "palette": { "accent": [255, 120, 40] }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use eframe::egui::Color32;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config value: {field} {reason}, got {value}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
        value: f32,
    },
}

/// Colours used by the frame renderer, as `[r, g, b]` triples.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Palette {
    pub background_center: [u8; 3],
    pub background_edge: [u8; 3],
    /// Line and particle hue; alpha is applied per shape.
    pub accent: [u8; 3],
    pub particle_alpha: f32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background_center: [0x0a, 0x0a, 0x0a],
            background_edge: [0x05, 0x05, 0x05],
            accent: [0, 240, 255],
            particle_alpha: 0.6,
        }
    }
}

impl Palette {
    pub fn background_center(&self) -> Color32 {
        let [r, g, b] = self.background_center;
        Color32::from_rgb(r, g, b)
    }

    pub fn background_edge(&self) -> Color32 {
        let [r, g, b] = self.background_edge;
        Color32::from_rgb(r, g, b)
    }

    pub fn accent_with_alpha(&self, alpha: f32) -> Color32 {
        let [r, g, b] = self.accent;
        let alpha = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color32::from_rgba_unmultiplied(r, g, b, alpha)
    }

    pub fn particle(&self) -> Color32 {
        self.accent_with_alpha(self.particle_alpha)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    pub particle_count: usize,
    pub connection_distance: f32,
    pub max_connection_opacity: f32,
    pub pointer_radius: f32,
    pub repulsion_strength: f32,
    pub damping: f32,
    pub max_seed_speed: f32,
    pub min_size: f32,
    pub max_size: f32,
    pub seed: Option<u64>,
    pub palette: Palette,
    pub show_fps: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 150,
            connection_distance: 150.0,
            max_connection_opacity: 0.3,
            pointer_radius: 150.0,
            repulsion_strength: 0.2,
            damping: 0.99,
            max_seed_speed: 0.25,
            min_size: 1.0,
            max_size: 3.0,
            seed: None,
            palette: Palette::default(),
            show_fps: false,
        }
    }
}

impl FieldConfig {
    pub fn from_json_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text, path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be finite and positive",
                    value,
                })
            }
        }

        positive("connection_distance", self.connection_distance)?;
        positive("pointer_radius", self.pointer_radius)?;
        positive("min_size", self.min_size)?;
        positive("max_size", self.max_size)?;

        if !(self.damping.is_finite() && self.damping > 0.0 && self.damping <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "damping",
                reason: "must lie in (0, 1]",
                value: self.damping,
            });
        }

        if self.min_size > self.max_size {
            return Err(ConfigError::Invalid {
                field: "min_size",
                reason: "must not exceed max_size",
                value: self.min_size,
            });
        }

        if !(self.max_seed_speed.is_finite() && self.max_seed_speed >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "max_seed_speed",
                reason: "must be finite and non-negative",
                value: self.max_seed_speed,
            });
        }

        for (field, value) in [
            ("max_connection_opacity", self.max_connection_opacity),
            ("palette.particle_alpha", self.palette.particle_alpha),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must lie in [0, 1]",
                    value,
                });
            }
        }

        if !self.repulsion_strength.is_finite() {
            return Err(ConfigError::Invalid {
                field: "repulsion_strength",
                reason: "must be finite",
                value: self.repulsion_strength,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = FieldConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.particle_count, 150);
        assert_eq!(config.connection_distance, 150.0);
        assert_eq!(config.pointer_radius, 150.0);
        assert_eq!(config.damping, 0.99);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = FieldConfig::from_json_str(
            r#"{ "particle_count": 12, "seed": 9, "palette": { "accent": [1, 2, 3] } }"#,
            Path::new("inline.json"),
        )
        .expect("valid config");

        assert_eq!(config.particle_count, 12);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.palette.accent, [1, 2, 3]);
        assert_eq!(config.palette.particle_alpha, 0.6);
        assert_eq!(config.connection_distance, 150.0);
    }

    #[test]
    fn rejects_bad_damping() {
        let error = FieldConfig::from_json_str(r#"{ "damping": 1.5 }"#, Path::new("bad.json"))
            .expect_err("damping above one");
        assert!(matches!(
            error,
            ConfigError::Invalid {
                field: "damping",
                ..
            }
        ));
    }

    #[test]
    fn rejects_inverted_size_range() {
        let config = FieldConfig {
            min_size: 4.0,
            max_size: 2.0,
            ..FieldConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn reports_parse_errors_with_path() {
        let error = FieldConfig::from_json_str("{ not json", Path::new("broken.json"))
            .expect_err("malformed json");
        assert!(error.to_string().contains("broken.json"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let error = FieldConfig::from_json_file(Path::new("/nonexistent/particle-field.json"))
            .expect_err("missing file");
        assert!(matches!(error, ConfigError::Io { .. }));
    }

    #[test]
    fn palette_alpha_maps_to_bytes() {
        let palette = Palette::default();
        assert_eq!(palette.particle().a(), 153);
        assert_eq!(palette.accent_with_alpha(0.0).a(), 0);
        assert_eq!(palette.accent_with_alpha(2.0).a(), 255);
    }
}
