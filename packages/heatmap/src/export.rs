//! `GeoJSON` export for map widgets that take a `FeatureCollection` as the
//! heatmap source.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};

use crate::HeatmapPoint;

/// Converts points into `Point` features with a `weight` property.
///
/// Coordinates are emitted in `GeoJSON` order (`[lng, lat]`).
#[must_use]
pub fn to_feature_collection(points: &[HeatmapPoint]) -> FeatureCollection {
    let features = points
        .iter()
        .map(|point| {
            let mut properties = JsonObject::new();
            properties.insert("weight".to_string(), JsonValue::from(point.weight));

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Point(vec![
                    point.longitude,
                    point.latitude,
                ]))),
                id: None,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_lng_lat_and_weight() {
        let points = [HeatmapPoint {
            latitude: 6.9271,
            longitude: 79.8612,
            weight: 0.4,
        }];
        let collection = to_feature_collection(&points);
        assert_eq!(collection.features.len(), 1);

        let json: serde_json::Value = serde_json::to_value(&collection).unwrap();
        let feature = &json["features"][0];
        assert_eq!(feature["geometry"]["type"], "Point");
        assert_eq!(feature["geometry"]["coordinates"][0], 79.8612);
        assert_eq!(feature["geometry"]["coordinates"][1], 6.9271);
        assert_eq!(feature["properties"]["weight"], 0.4);
    }

    #[test]
    fn empty_input_gives_empty_collection() {
        assert!(to_feature_collection(&[]).features.is_empty());
    }
}
