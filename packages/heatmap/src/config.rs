//! Heatmap synthesis settings: offset radius, weight table and satellite
//! constellation.
//!
//! Every field has a default, so a config TOML only needs the values it
//! overrides:
//!
//! ```toml
//! radius = 0.02
//!
//! [weights]
//! medium = 0.6
//! ```

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::f64::consts::SQRT_2;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::style::HeatmapStyle;
use crate::weights::{SeverityWeights, WeightsError};

/// Default satellite offset radius in degrees (roughly 1.5 km at the
/// equator).
pub const DEFAULT_RADIUS_DEG: f64 = 0.015;

/// Fewest distinct satellite directions a valid constellation may cover.
pub const MIN_DIRECTIONS: usize = 8;

/// Directions a ring places its four satellites in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RingPattern {
    /// North, south, east, west.
    Cardinal,
    /// The four diagonals.
    Diagonal,
}

impl RingPattern {
    /// Unit `(lat, lng)` offsets in emission order.
    #[must_use]
    pub const fn offsets(self) -> [(f64, f64); 4] {
        match self {
            Self::Cardinal => [(1.0, 0.0), (-1.0, 0.0), (0.0, 1.0), (0.0, -1.0)],
            Self::Diagonal => [(1.0, 1.0), (-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0)],
        }
    }

    /// Distance of a unit offset from the origin.
    #[must_use]
    pub const fn spread(self) -> f64 {
        match self {
            Self::Cardinal => 1.0,
            Self::Diagonal => SQRT_2,
        }
    }
}

/// Four satellites at `scale * radius` around the primary point, each
/// weighing `weight_factor` times the zone's base weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    /// Offset as a fraction of the configured radius, per axis.
    pub scale: f64,
    /// Multiplier applied to the zone's base weight.
    pub weight_factor: f64,
    /// Directions of the four satellites.
    pub pattern: RingPattern,
}

/// Default constellation: 12 satellites over 8 directions.
#[must_use]
pub fn default_rings() -> Vec<Ring> {
    vec![
        Ring {
            scale: 1.0,
            weight_factor: 0.4,
            pattern: RingPattern::Cardinal,
        },
        Ring {
            scale: 0.7,
            weight_factor: 0.6,
            pattern: RingPattern::Diagonal,
        },
        Ring {
            scale: 0.3,
            weight_factor: 0.8,
            pattern: RingPattern::Diagonal,
        },
    ]
}

/// Errors from loading or validating a [`HeatmapConfig`].
#[derive(Debug, thiserror::Error)]
pub enum HeatmapConfigError {
    /// The config file could not be read.
    #[error("failed to read heatmap config {}: {source}", .path.display())]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config is not valid TOML for this shape.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The radius is not a positive finite number.
    #[error("radius must be positive, got {value}")]
    InvalidRadius {
        /// The rejected radius.
        value: f64,
    },

    /// The severity weight table is invalid.
    #[error(transparent)]
    Weights(#[from] WeightsError),

    /// A ring places satellites outside the radius or does not lighten them.
    #[error("ring {index}: {reason}")]
    InvalidRing {
        /// Position of the ring in the config.
        index: usize,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// The rings together cover too few directions around the primary
    /// point.
    #[error("rings cover {found} directions, need at least {}", MIN_DIRECTIONS)]
    TooFewDirections {
        /// Number of distinct directions covered.
        found: usize,
    },

    /// The layer style is out of range.
    #[error("style: {reason}")]
    InvalidStyle {
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// Settings for [`crate::synthesize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    /// Satellite offset radius in degrees.
    pub radius: f64,
    /// Severity → base weight table.
    pub weights: SeverityWeights,
    /// Satellite rings, emitted in order after the primary point.
    pub rings: Vec<Ring>,
    /// Rendering hints passed through to the map widget.
    pub style: HeatmapStyle,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS_DEG,
            weights: SeverityWeights::default(),
            rings: default_rings(),
            style: HeatmapStyle::default(),
        }
    }
}

impl HeatmapConfig {
    /// Parses and validates a config from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`HeatmapConfigError`] if the TOML is malformed or the
    /// resulting config is invalid.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, HeatmapConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns [`HeatmapConfigError`] if the file cannot be read or is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, HeatmapConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|source| HeatmapConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let config = Self::from_toml_str(&contents)?;
        log::info!(
            "Loaded heatmap config from {} ({} satellites per zone)",
            path.display(),
            config.satellites_per_zone()
        );
        Ok(config)
    }

    /// Number of satellite points emitted per zone.
    #[must_use]
    pub fn satellites_per_zone(&self) -> usize {
        self.rings.iter().map(|ring| ring.pattern.offsets().len()).sum()
    }

    /// Number of distinct compass directions the rings place satellites in.
    #[must_use]
    pub fn directions(&self) -> usize {
        self.rings
            .iter()
            .flat_map(|ring| ring.pattern.offsets())
            .map(|(lat, lng)| (direction(lat), direction(lng)))
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Checks that the radius is positive, the weight table is ordinal,
    /// every satellite lies within the radius and weighs less than its
    /// primary point, the rings cover at least [`MIN_DIRECTIONS`]
    /// directions, and the style is in range.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), HeatmapConfigError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(HeatmapConfigError::InvalidRadius { value: self.radius });
        }

        self.weights.validate()?;

        for (index, ring) in self.rings.iter().enumerate() {
            if !(ring.scale > 0.0 && ring.scale * ring.pattern.spread() <= 1.0) {
                return Err(HeatmapConfigError::InvalidRing {
                    index,
                    reason: "satellites must lie within the radius",
                });
            }
            if !(ring.weight_factor > 0.0 && ring.weight_factor < 1.0) {
                return Err(HeatmapConfigError::InvalidRing {
                    index,
                    reason: "weight factor must be in (0, 1)",
                });
            }
        }

        let found = self.directions();
        if found < MIN_DIRECTIONS {
            return Err(HeatmapConfigError::TooFewDirections { found });
        }

        self.style
            .validate()
            .map_err(|reason| HeatmapConfigError::InvalidStyle { reason })?;

        Ok(())
    }
}

fn direction(offset: f64) -> Ordering {
    offset.partial_cmp(&0.0).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid_with_twelve_satellites() {
        let config = HeatmapConfig::default();
        config.validate().unwrap();
        assert_eq!(config.satellites_per_zone(), 12);
    }

    #[test]
    fn default_constellation_covers_eight_directions() {
        assert_eq!(HeatmapConfig::default().directions(), 8);
    }

    #[test]
    fn rejects_empty_constellation() {
        match HeatmapConfig::from_toml_str("rings = []\n") {
            Err(HeatmapConfigError::TooFewDirections { found }) => assert_eq!(found, 0),
            other => panic!("expected TooFewDirections, got {other:?}"),
        }
    }

    #[test]
    fn rejects_cardinal_ring_alone() {
        let toml = r#"
            [[rings]]
            scale = 1.0
            weight_factor = 0.4
            pattern = "cardinal"
        "#;
        assert!(matches!(
            HeatmapConfig::from_toml_str(toml),
            Err(HeatmapConfigError::TooFewDirections { found: 4 })
        ));
    }

    #[test]
    fn accepts_one_ring_of_each_pattern() {
        let toml = r#"
            [[rings]]
            scale = 1.0
            weight_factor = 0.5
            pattern = "cardinal"

            [[rings]]
            scale = 0.5
            weight_factor = 0.7
            pattern = "diagonal"
        "#;
        let config = HeatmapConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.satellites_per_zone(), 8);
    }

    #[test]
    fn rejects_out_of_range_style() {
        assert!(matches!(
            HeatmapConfig::from_toml_str("[style]\nopacity = 1.5\n"),
            Err(HeatmapConfigError::InvalidStyle { .. })
        ));
        assert!(matches!(
            HeatmapConfig::from_toml_str("[style]\nradiusPx = 0\n"),
            Err(HeatmapConfigError::InvalidStyle { .. })
        ));
        assert!(matches!(
            HeatmapConfig::from_toml_str("[style]\ncolorMapSize = 0\n"),
            Err(HeatmapConfigError::InvalidStyle { .. })
        ));
    }

    #[test]
    fn loads_config_file_from_disk() {
        let tmp = std::env::temp_dir().join("safety_map_heatmap_config_test");
        let _ = std::fs::remove_dir_all(&tmp);
        std::fs::create_dir_all(&tmp).unwrap();

        let path = tmp.join("heatmap.toml");
        std::fs::write(&path, "radius = 0.01\n[weights]\nlow = 0.3\n").unwrap();
        let config = HeatmapConfig::load(&path).unwrap();
        assert!((config.radius - 0.01).abs() < f64::EPSILON);
        assert!((config.weights.low - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.satellites_per_zone(), 12);

        let missing = tmp.join("missing.toml");
        match HeatmapConfig::load(&missing) {
            Err(HeatmapConfigError::Io { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected Io error, got {other:?}"),
        }

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let config = HeatmapConfig::from_toml_str("").unwrap();
        assert_eq!(config, HeatmapConfig::default());
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let config =
            HeatmapConfig::from_toml_str("radius = 0.02\n[weights]\nmedium = 0.6\n").unwrap();
        assert!((config.radius - 0.02).abs() < f64::EPSILON);
        assert!((config.weights.medium - 0.6).abs() < f64::EPSILON);
        assert!((config.weights.high - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.rings, default_rings());
    }

    #[test]
    fn rejects_non_positive_radius() {
        assert!(matches!(
            HeatmapConfig::from_toml_str("radius = 0.0"),
            Err(HeatmapConfigError::InvalidRadius { .. })
        ));
    }

    #[test]
    fn rejects_ring_outside_radius() {
        let toml = r#"
            [[rings]]
            scale = 0.8
            weight_factor = 0.5
            pattern = "diagonal"
        "#;
        assert!(matches!(
            HeatmapConfig::from_toml_str(toml),
            Err(HeatmapConfigError::InvalidRing { index: 0, .. })
        ));
    }

    #[test]
    fn rejects_ring_heavier_than_primary() {
        let toml = r#"
            [[rings]]
            scale = 0.5
            weight_factor = 1.0
            pattern = "cardinal"
        "#;
        assert!(matches!(
            HeatmapConfig::from_toml_str(toml),
            Err(HeatmapConfigError::InvalidRing { .. })
        ));
    }

    #[test]
    fn rejects_unordered_weights() {
        assert!(matches!(
            HeatmapConfig::from_toml_str("[weights]\nlow = 0.9\n"),
            Err(HeatmapConfigError::Weights(_))
        ));
    }
}
