//! Rendering hints for the map widget's heatmap layer.
//!
//! The synthesizer does not use these; they travel alongside the points so
//! the renderer draws a green-to-dark-red halo.

use serde::{Deserialize, Serialize};

/// One color stop of the density gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientStop {
    /// CSS color string.
    pub color: String,
    /// Density in `[0, 1]` at which this color starts.
    pub start_point: f64,
}

impl GradientStop {
    fn new(color: &str, start_point: f64) -> Self {
        Self {
            color: color.to_string(),
            start_point,
        }
    }
}

/// Heatmap layer appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeatmapStyle {
    /// Blur radius in screen pixels.
    pub radius_px: u32,
    /// Layer opacity in `[0, 1]`.
    pub opacity: f64,
    /// Color stops, ascending by start point.
    pub gradient: Vec<GradientStop>,
    /// Resolution of the color lookup table.
    pub color_map_size: u32,
}

impl Default for HeatmapStyle {
    fn default() -> Self {
        Self {
            radius_px: 80,
            opacity: 0.6,
            gradient: vec![
                GradientStop::new("rgba(0,255,0,0)", 0.0),
                GradientStop::new("rgba(0,255,0,0.1)", 0.1),
                GradientStop::new("rgba(144,238,144,0.3)", 0.3),
                GradientStop::new("rgba(255,255,0,0.4)", 0.5),
                GradientStop::new("rgba(255,165,0,0.6)", 0.65),
                GradientStop::new("rgba(255,69,0,0.7)", 0.8),
                GradientStop::new("rgba(255,0,0,0.8)", 0.9),
                GradientStop::new("rgba(139,0,0,0.9)", 1.0),
            ],
            color_map_size: 1024,
        }
    }
}

impl HeatmapStyle {
    /// Checks that the blur radius and color map size are non-zero, the
    /// opacity lies in `[0, 1]` and the gradient ascends.
    ///
    /// # Errors
    ///
    /// Returns a description of the first violated constraint.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.radius_px == 0 {
            return Err("blur radius must be positive");
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err("opacity must lie within [0, 1]");
        }
        if self.color_map_size == 0 {
            return Err("color map size must be positive");
        }
        if !self.gradient_is_ascending() {
            return Err("gradient start points must ascend within [0, 1]");
        }
        Ok(())
    }

    /// Whether the gradient stops ascend strictly within `[0, 1]`.
    #[must_use]
    pub fn gradient_is_ascending(&self) -> bool {
        let in_range = self
            .gradient
            .iter()
            .all(|stop| (0.0..=1.0).contains(&stop.start_point));
        let ascending = self
            .gradient
            .windows(2)
            .all(|pair| pair[0].start_point < pair[1].start_point);
        in_range && ascending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_gradient_runs_from_zero_to_one() {
        let style = HeatmapStyle::default();
        assert!(style.gradient_is_ascending());
        assert_eq!(style.gradient.len(), 8);
        assert!(style.gradient[0].start_point.abs() < f64::EPSILON);
        assert!((style.gradient[7].start_point - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn default_style_is_valid() {
        assert_eq!(HeatmapStyle::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_opacity_outside_unit_range() {
        let style = HeatmapStyle {
            opacity: -0.1,
            ..HeatmapStyle::default()
        };
        assert!(style.validate().is_err());
    }

    #[test]
    fn rejects_zero_sizes() {
        let style = HeatmapStyle {
            radius_px: 0,
            ..HeatmapStyle::default()
        };
        assert!(style.validate().is_err());

        let style = HeatmapStyle {
            color_map_size: 0,
            ..HeatmapStyle::default()
        };
        assert!(style.validate().is_err());
    }

    #[test]
    fn detects_unsorted_gradient() {
        let mut style = HeatmapStyle::default();
        style.gradient.swap(1, 2);
        assert!(!style.gradient_is_ascending());
    }
}
