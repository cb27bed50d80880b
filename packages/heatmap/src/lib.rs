#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Heatmap point synthesis for danger zone overlays.
//!
//! A heat-map layer given one point per hazard renders a hard dot. To get a
//! smooth, radially decaying halo, each zone is expanded into a primary
//! point carrying the zone's severity weight plus a fixed constellation of
//! lighter satellite points around it (see [`HeatmapConfig`]).
//!
//! Synthesis is a pure, deterministic transform: the same zones always give
//! the same points, in the same order, and inputs are never modified. It
//! assumes well-formed zones; coordinate validation happens when zones are
//! constructed.

pub mod config;
pub mod export;
pub mod style;
pub mod weights;

use safety_map_zone_models::DangerZone;
use serde::{Deserialize, Serialize};

pub use config::{HeatmapConfig, HeatmapConfigError, Ring, RingPattern};
pub use export::to_feature_collection;
pub use style::{GradientStop, HeatmapStyle};
pub use weights::{SeverityWeights, WeightsError};

/// A weighted coordinate consumed by the heatmap layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatmapPoint {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Relative intensity in `(0, 1]`.
    pub weight: f64,
}

/// Expands `zones` into heatmap points.
///
/// For each zone, in input order: the primary point at the zone position
/// with the severity's base weight, then every ring's four satellites in
/// ring order.
pub fn synthesize<'a, I>(zones: I, config: &HeatmapConfig) -> Vec<HeatmapPoint>
where
    I: IntoIterator<Item = &'a DangerZone>,
{
    let zones = zones.into_iter();
    let per_zone = 1 + config.satellites_per_zone();
    let mut points = Vec::with_capacity(zones.size_hint().0 * per_zone);

    for zone in zones {
        let latitude = zone.position.latitude();
        let longitude = zone.position.longitude();
        let base = config.weights.weight(zone.severity);

        points.push(HeatmapPoint {
            latitude,
            longitude,
            weight: base,
        });

        for ring in &config.rings {
            let offset = config.radius * ring.scale;
            let weight = base * ring.weight_factor;
            for (d_lat, d_lng) in ring.pattern.offsets() {
                points.push(HeatmapPoint {
                    latitude: d_lat.mul_add(offset, latitude),
                    longitude: d_lng.mul_add(offset, longitude),
                    weight,
                });
            }
        }
    }

    log::debug!("Synthesized {} heatmap points", points.len());
    points
}
