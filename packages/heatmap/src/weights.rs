//! The single severity → base weight table.

use safety_map_zone_models::ZoneSeverity;
use serde::{Deserialize, Serialize};

/// Base heatmap weight for each severity level.
///
/// Must satisfy `high > medium > low` with every weight in `(0, 1]`; see
/// [`SeverityWeights::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityWeights {
    /// Weight of a high-severity zone.
    pub high: f64,
    /// Weight of a medium-severity zone.
    pub medium: f64,
    /// Weight of a low-severity zone.
    pub low: f64,
}

impl SeverityWeights {
    /// The default table: high 1.0, medium 0.7, low 0.4.
    pub const DEFAULT: Self = Self {
        high: 1.0,
        medium: 0.7,
        low: 0.4,
    };

    /// Base weight for `severity`.
    #[must_use]
    pub const fn weight(&self, severity: ZoneSeverity) -> f64 {
        match severity {
            ZoneSeverity::High => self.high,
            ZoneSeverity::Medium => self.medium,
            ZoneSeverity::Low => self.low,
        }
    }

    /// Checks the ordering and range constraints.
    ///
    /// # Errors
    ///
    /// Returns the offending severity and value if a weight is outside
    /// `(0, 1]`, or [`WeightsError::OutOfOrder`] if the weights are not
    /// strictly decreasing from high to low.
    pub fn validate(&self) -> Result<(), WeightsError> {
        for &severity in ZoneSeverity::all() {
            let value = self.weight(severity);
            if !(value > 0.0 && value <= 1.0) {
                return Err(WeightsError::OutOfRange { severity, value });
            }
        }
        if !(self.high > self.medium && self.medium > self.low) {
            return Err(WeightsError::OutOfOrder {
                high: self.high,
                medium: self.medium,
                low: self.low,
            });
        }
        Ok(())
    }
}

impl Default for SeverityWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A severity weight table that breaks its invariants.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum WeightsError {
    /// A weight is not in `(0, 1]`.
    #[error("{severity} weight {value} is outside (0, 1]")]
    OutOfRange {
        /// Severity whose weight is invalid.
        severity: ZoneSeverity,
        /// The invalid weight.
        value: f64,
    },

    /// Weights are not strictly decreasing from high to low.
    #[error("weights must satisfy high > medium > low (got {high}, {medium}, {low})")]
    OutOfOrder {
        /// High weight.
        high: f64,
        /// Medium weight.
        medium: f64,
        /// Low weight.
        low: f64,
    },
}
