#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Danger zone taxonomy, severity levels and validated zone records.
//!
//! This crate defines the closed set of hazard categories shown on the
//! safety map, the ordinal severity scale, and the [`DangerZone`] record
//! itself. Zones are only ever produced by validating a [`RawZone`], so a
//! zone with a missing category, severity or position cannot exist.

pub mod recency;
pub mod timestamp;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Hazard category of a reported danger zone.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DangerCategory {
    /// General physical danger (road works, unsafe areas)
    Danger,
    /// Flooding and monsoon risk
    Flood,
    /// Card skimming, ATM and payment fraud
    Fraud,
    /// Pickpocketing and theft
    Theft,
    /// Tourist scams (fake taxis, overcharging, gem deals)
    Scam,
}

impl DangerCategory {
    /// Returns the filter chip label for this category.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Danger => "Danger",
            Self::Flood => "Floods",
            Self::Fraud => "Fraud",
            Self::Theft => "Theft",
            Self::Scam => "Scams",
        }
    }

    /// Returns the singular, capitalized name used in zone detail headings.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Danger => "Danger",
            Self::Flood => "Flood",
            Self::Fraud => "Fraud",
            Self::Theft => "Theft",
            Self::Scam => "Scam",
        }
    }

    /// Returns the filter chip color as a hex string.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Danger => "#E67E22",
            Self::Flood => "#4169E1",
            Self::Fraud => "#9B59B6",
            Self::Theft => "#F4A460",
            Self::Scam => "#FF6B6B",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Danger,
            Self::Flood,
            Self::Fraud,
            Self::Theft,
            Self::Scam,
        ]
    }
}

/// Ordinal risk level of a danger zone.
///
/// Variants are declared in ascending order so the derived [`Ord`] matches
/// the risk ordering (`Low < Medium < High`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ZoneSeverity {
    /// Minor inconvenience (delays, isolated incidents)
    Low,
    /// Elevated risk, stay alert
    Medium,
    /// Serious risk, avoid if possible
    High,
}

impl ZoneSeverity {
    /// Returns the marker color for this severity as a hex string.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Low => "#32CD32",
            Self::Medium => "#F4A460",
            Self::High => "#FF6B6B",
        }
    }

    /// Returns the capitalized name (e.g. `"High"`).
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Returns all variants of this enum, lowest first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Low, Self::Medium, Self::High]
    }
}

/// Reasons a zone record can be rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ZoneError {
    /// A required field was absent.
    #[error("missing required field `{field}`")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },

    /// The zone id was present but empty.
    #[error("zone id must not be empty")]
    EmptyId,

    /// The category string is not one of the known categories.
    #[error("unknown category {value:?}")]
    UnknownCategory {
        /// The rejected category value.
        value: String,
    },

    /// The severity string is not one of the known levels.
    #[error("unknown severity {value:?}")]
    UnknownSeverity {
        /// The rejected severity value.
        value: String,
    },

    /// Latitude outside [-90, 90] or not finite.
    #[error("latitude {value} is outside [-90, 90]")]
    LatitudeOutOfRange {
        /// The rejected latitude.
        value: f64,
    },

    /// Longitude outside [-180, 180] or not finite.
    #[error("longitude {value} is outside [-180, 180]")]
    LongitudeOutOfRange {
        /// The rejected longitude.
        value: f64,
    },
}

/// A validated latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CoordinatesRepr")]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct CoordinatesRepr {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<CoordinatesRepr> for Coordinates {
    type Error = ZoneError;

    fn try_from(repr: CoordinatesRepr) -> Result<Self, Self::Error> {
        Self::new(repr.latitude, repr.longitude)
    }
}

impl Coordinates {
    /// Creates a coordinate pair.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneError::LatitudeOutOfRange`] or
    /// [`ZoneError::LongitudeOutOfRange`] if either value is out of range or
    /// not finite.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ZoneError> {
        // `contains` is false for NaN, so non-finite values are rejected too.
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ZoneError::LatitudeOutOfRange { value: latitude });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ZoneError::LongitudeOutOfRange { value: longitude });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// One reported hazard location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawZone")]
pub struct DangerZone {
    /// Stable identifier, unique within a registry.
    pub id: String,
    /// Where the hazard is.
    #[serde(flatten)]
    pub position: Coordinates,
    /// Hazard category.
    pub category: DangerCategory,
    /// Risk level; drives marker color and heatmap weight.
    pub severity: ZoneSeverity,
    /// Short display title.
    pub title: String,
    /// Longer display description.
    pub description: String,
    /// Number of corroborating user reports.
    pub report_count: u32,
    /// Whether an authority confirmed the report.
    pub verified: bool,
    /// Display-only recency text (e.g. `"2 hours ago"`).
    pub last_updated: String,
    /// When the zone was last reported, if known. Takes precedence over
    /// [`Self::last_updated`] when rendering recency.
    pub reported_at: Option<DateTime<Utc>>,
    /// Safety tips shown in the zone detail.
    pub tips: Vec<String>,
}

impl DangerZone {
    /// Heading used in the zone detail, e.g. `"Scam • High Risk"`.
    #[must_use]
    pub fn subtitle(&self) -> String {
        format!(
            "{} \u{2022} {} Risk",
            self.category.title(),
            self.severity.title()
        )
    }

    /// Recency label relative to `now`.
    ///
    /// Derived from [`Self::reported_at`] when present, otherwise the static
    /// [`Self::last_updated`] text is returned unchanged.
    #[must_use]
    pub fn recency_label(&self, now: DateTime<Utc>) -> String {
        self.reported_at.map_or_else(
            || self.last_updated.clone(),
            |at| recency::format_recency(at, now),
        )
    }
}

/// An unvalidated zone record as it appears in a data source.
///
/// Every field is optional so that a missing value surfaces as a
/// [`ZoneError`] naming the field rather than a generic parse failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawZone {
    /// Zone identifier.
    pub id: Option<String>,
    /// Latitude in degrees.
    pub latitude: Option<f64>,
    /// Longitude in degrees.
    pub longitude: Option<f64>,
    /// Category key (e.g. `"scam"`).
    pub category: Option<String>,
    /// Severity key (e.g. `"high"`).
    pub severity: Option<String>,
    /// Display title.
    pub title: Option<String>,
    /// Display description.
    pub description: Option<String>,
    /// Number of corroborating reports.
    #[serde(alias = "reportCount", alias = "reports")]
    pub report_count: Option<u32>,
    /// Whether an authority confirmed the report.
    pub verified: Option<bool>,
    /// Display-only recency text.
    #[serde(alias = "lastUpdated")]
    pub last_updated: Option<String>,
    /// Timestamp of the latest report.
    #[serde(
        default,
        alias = "reportedAt",
        deserialize_with = "timestamp::deserialize_optional"
    )]
    pub reported_at: Option<DateTime<Utc>>,
    /// Safety tips.
    pub tips: Option<Vec<String>>,
}

impl RawZone {
    /// Validates this record into a [`DangerZone`].
    ///
    /// # Errors
    ///
    /// Returns [`ZoneError`] if the id, category, severity, latitude or
    /// longitude is missing or invalid.
    pub fn validate(self) -> Result<DangerZone, ZoneError> {
        let id = self.id.ok_or(ZoneError::MissingField { field: "id" })?;
        if id.trim().is_empty() {
            return Err(ZoneError::EmptyId);
        }

        let category = self
            .category
            .ok_or(ZoneError::MissingField { field: "category" })?;
        let category = category
            .parse::<DangerCategory>()
            .map_err(|_| ZoneError::UnknownCategory { value: category })?;

        let severity = self
            .severity
            .ok_or(ZoneError::MissingField { field: "severity" })?;
        let severity = severity
            .parse::<ZoneSeverity>()
            .map_err(|_| ZoneError::UnknownSeverity { value: severity })?;

        let latitude = self
            .latitude
            .ok_or(ZoneError::MissingField { field: "latitude" })?;
        let longitude = self
            .longitude
            .ok_or(ZoneError::MissingField { field: "longitude" })?;
        let position = Coordinates::new(latitude, longitude)?;

        Ok(DangerZone {
            id,
            position,
            category,
            severity,
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            report_count: self.report_count.unwrap_or(0),
            verified: self.verified.unwrap_or(false),
            last_updated: self.last_updated.unwrap_or_default(),
            reported_at: self.reported_at,
            tips: self.tips.unwrap_or_default(),
        })
    }
}

impl TryFrom<RawZone> for DangerZone {
    type Error = ZoneError;

    fn try_from(raw: RawZone) -> Result<Self, Self::Error> {
        raw.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_colombo() -> RawZone {
        RawZone {
            id: Some("1".to_string()),
            latitude: Some(6.9271),
            longitude: Some(79.8612),
            category: Some("scam".to_string()),
            severity: Some("high".to_string()),
            title: Some("Tourist Scam Zone".to_string()),
            report_count: Some(15),
            verified: Some(true),
            last_updated: Some("2 hours ago".to_string()),
            ..RawZone::default()
        }
    }

    #[test]
    fn severity_ordering_is_ascending() {
        assert!(ZoneSeverity::Low < ZoneSeverity::Medium);
        assert!(ZoneSeverity::Medium < ZoneSeverity::High);
    }

    #[test]
    fn category_keys_parse_from_snake_case() {
        for category in DangerCategory::all() {
            let key: &str = category.as_ref();
            assert_eq!(key.parse::<DangerCategory>().unwrap(), *category);
        }
        assert!("weather".parse::<DangerCategory>().is_err());
    }

    #[test]
    fn validates_complete_record() {
        let zone = raw_colombo().validate().unwrap();
        assert_eq!(zone.id, "1");
        assert_eq!(zone.category, DangerCategory::Scam);
        assert_eq!(zone.severity, ZoneSeverity::High);
        assert!((zone.position.latitude() - 6.9271).abs() < f64::EPSILON);
        assert_eq!(zone.report_count, 15);
        assert!(zone.tips.is_empty());
    }

    #[test]
    fn rejects_missing_category_and_severity() {
        let raw = RawZone {
            category: None,
            ..raw_colombo()
        };
        assert_eq!(
            raw.validate(),
            Err(ZoneError::MissingField { field: "category" })
        );

        let raw = RawZone {
            severity: None,
            ..raw_colombo()
        };
        assert_eq!(
            raw.validate(),
            Err(ZoneError::MissingField { field: "severity" })
        );
    }

    #[test]
    fn rejects_missing_position() {
        let raw = RawZone {
            longitude: None,
            ..raw_colombo()
        };
        assert_eq!(
            raw.validate(),
            Err(ZoneError::MissingField { field: "longitude" })
        );
    }

    #[test]
    fn rejects_unknown_category() {
        let raw = RawZone {
            category: Some("weather".to_string()),
            ..raw_colombo()
        };
        assert_eq!(
            raw.validate(),
            Err(ZoneError::UnknownCategory {
                value: "weather".to_string()
            })
        );
    }

    #[test]
    fn rejects_blank_id() {
        let raw = RawZone {
            id: Some("  ".to_string()),
            ..raw_colombo()
        };
        assert_eq!(raw.validate(), Err(ZoneError::EmptyId));
    }

    #[test]
    fn coordinates_reject_out_of_range_and_nan() {
        assert!(matches!(
            Coordinates::new(90.5, 0.0),
            Err(ZoneError::LatitudeOutOfRange { .. })
        ));
        assert!(matches!(
            Coordinates::new(0.0, -180.01),
            Err(ZoneError::LongitudeOutOfRange { .. })
        ));
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
        assert!(Coordinates::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn subtitle_names_category_and_severity() {
        let zone = raw_colombo().validate().unwrap();
        assert_eq!(zone.subtitle(), "Scam \u{2022} High Risk");
    }

    #[test]
    fn json_deserialization_goes_through_validation() {
        let zone = raw_colombo().validate().unwrap();
        let json = serde_json::to_string(&zone).unwrap();
        let parsed: DangerZone = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, zone);

        let bad = json.replace("6.9271", "96.9271");
        assert!(serde_json::from_str::<DangerZone>(&bad).is_err());
    }
}
