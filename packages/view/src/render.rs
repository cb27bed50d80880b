//! What the map widget receives: markers, heatmap points and zone details.

use chrono::{DateTime, Utc};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};
use safety_map_heatmap::{HeatmapPoint, HeatmapStyle};
use safety_map_zone_models::{DangerCategory, DangerZone, ZoneSeverity};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::region::MapRegion;

/// Base map imagery under the markers.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MapType {
    /// Street map.
    #[default]
    Standard,
    /// Satellite imagery.
    Satellite,
    /// Satellite imagery with street labels.
    Hybrid,
}

impl MapType {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Standard, Self::Satellite, Self::Hybrid]
    }
}

/// A danger zone marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneMarker {
    /// Zone id, passed back to [`crate::SafetyMapState::zone_detail`] on tap.
    pub id: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Hazard category (selects the icon).
    pub category: DangerCategory,
    /// Severity level.
    pub severity: ZoneSeverity,
    /// Marker color derived from severity.
    pub color: &'static str,
    /// Short title.
    pub title: String,
    /// Whether to draw the verified badge.
    pub verified: bool,
}

impl From<&DangerZone> for ZoneMarker {
    fn from(zone: &DangerZone) -> Self {
        Self {
            id: zone.id.clone(),
            latitude: zone.position.latitude(),
            longitude: zone.position.longitude(),
            category: zone.category,
            severity: zone.severity,
            color: zone.severity.color(),
            title: zone.title.clone(),
            verified: zone.verified,
        }
    }
}

/// One full frame for the map widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapRender {
    /// Camera region.
    pub region: MapRegion,
    /// Base map imagery.
    pub map_type: MapType,
    /// Markers for the visible zones, in registry order.
    pub markers: Vec<ZoneMarker>,
    /// Heatmap points for the visible zones; empty when the layer is off.
    pub heatmap: Vec<HeatmapPoint>,
    /// Heatmap layer appearance, `None` when the layer is off.
    pub heatmap_style: Option<HeatmapStyle>,
}

/// Content of the zone detail sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneDetail {
    /// Zone id.
    pub id: String,
    /// Title.
    pub title: String,
    /// `"<Category> • <Severity> Risk"`.
    pub subtitle: String,
    /// Header color derived from severity.
    pub color: &'static str,
    /// Full description.
    pub description: String,
    /// Number of corroborating reports.
    pub report_count: u32,
    /// How long ago the zone was last reported.
    pub recency: String,
    /// Whether an authority confirmed the report.
    pub verified: bool,
    /// Safety tips.
    pub tips: Vec<String>,
}

impl ZoneDetail {
    /// Builds the detail sheet for `zone`, with recency relative to `now`.
    #[must_use]
    pub fn new(zone: &DangerZone, now: DateTime<Utc>) -> Self {
        Self {
            id: zone.id.clone(),
            title: zone.title.clone(),
            subtitle: zone.subtitle(),
            color: zone.severity.color(),
            description: zone.description.clone(),
            report_count: zone.report_count,
            recency: zone.recency_label(now),
            verified: zone.verified,
            tips: zone.tips.clone(),
        }
    }
}

/// Converts markers into `GeoJSON` `Point` features carrying the marker
/// fields as properties.
#[must_use]
pub fn markers_to_feature_collection(markers: &[ZoneMarker]) -> FeatureCollection {
    let features = markers
        .iter()
        .map(|marker| {
            let mut properties = JsonObject::new();
            properties.insert("title".to_string(), JsonValue::from(marker.title.as_str()));
            properties.insert(
                "category".to_string(),
                JsonValue::from(marker.category.to_string()),
            );
            properties.insert(
                "severity".to_string(),
                JsonValue::from(marker.severity.to_string()),
            );
            properties.insert("color".to_string(), JsonValue::from(marker.color));
            properties.insert("verified".to_string(), JsonValue::from(marker.verified));

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Point(vec![
                    marker.longitude,
                    marker.latitude,
                ]))),
                id: Some(geojson::feature::Id::String(marker.id.clone())),
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}
