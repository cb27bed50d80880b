//! Map camera regions.

use geo::{BoundingRect, MultiPoint, Point};
use safety_map_zone_models::DangerZone;
use serde::{Deserialize, Serialize};

/// Smallest span a fitted region will zoom to, in degrees.
pub const MIN_DELTA_DEG: f64 = 0.05;

/// Extra margin added on each side of a fitted region, as a fraction of
/// the zones' span.
const FIT_PADDING: f64 = 0.2;

/// A visible map area: center plus latitude/longitude span in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapRegion {
    /// Center latitude.
    pub latitude: f64,
    /// Center longitude.
    pub longitude: f64,
    /// North-south span.
    pub latitude_delta: f64,
    /// East-west span.
    pub longitude_delta: f64,
}

impl MapRegion {
    /// The whole of Sri Lanka.
    pub const SRI_LANKA: Self = Self {
        latitude: 7.8731,
        longitude: 80.7718,
        latitude_delta: 3.5,
        longitude_delta: 3.5,
    };

    /// Frames `zones` with some padding, or `None` if there are none.
    ///
    /// Spans never shrink below [`MIN_DELTA_DEG`], so a single zone gets a
    /// street-level view rather than a zero-size one.
    #[must_use]
    pub fn fit(zones: &[&DangerZone]) -> Option<Self> {
        let points: MultiPoint<f64> = zones
            .iter()
            .map(|zone| Point::new(zone.position.longitude(), zone.position.latitude()))
            .collect();
        let rect = points.bounding_rect()?;
        let center = rect.center();

        Some(Self {
            latitude: center.y,
            longitude: center.x,
            latitude_delta: padded(rect.height()),
            longitude_delta: padded(rect.width()),
        })
    }

    /// Whether `(latitude, longitude)` falls inside this region.
    #[must_use]
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (latitude - self.latitude).abs() <= self.latitude_delta / 2.0
            && (longitude - self.longitude).abs() <= self.longitude_delta / 2.0
    }
}

impl Default for MapRegion {
    fn default() -> Self {
        Self::SRI_LANKA
    }
}

fn padded(span: f64) -> f64 {
    (span * (1.0 + 2.0 * FIT_PADDING)).max(MIN_DELTA_DEG)
}
