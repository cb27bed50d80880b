//! Zone sources: the embedded data set, TOML files, and in-memory lists.
//!
//! Zone sets share one TOML shape:
//!
//! ```toml
//! id = "sri_lanka"
//! name = "Sri Lanka community reports"
//!
//! [[zones]]
//! id = "1"
//! latitude = 6.9271
//! longitude = 79.8612
//! category = "scam"
//! severity = "high"
//! ```

use std::path::{Path, PathBuf};

use safety_map_zone_models::RawZone;
use serde::Deserialize;

use crate::{RegistryError, ZoneSource};

/// The built-in zone set, baked into the binary at compile time.
const EMBEDDED_ZONES_TOML: &str = include_str!("../zones/sri_lanka.toml");

/// A named collection of raw zone records, as stored in TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct ZoneSet {
    /// Unique identifier of the set.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Records in display order.
    #[serde(default)]
    pub zones: Vec<RawZone>,
}

/// Parses a zone set from a TOML string.
///
/// # Errors
///
/// Returns [`RegistryError::Toml`] if the TOML is malformed.
pub fn parse_zone_toml(toml_str: &str) -> Result<ZoneSet, RegistryError> {
    Ok(toml::from_str(toml_str)?)
}

/// The zone set shipped with the application.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedZoneSource;

impl ZoneSource for EmbeddedZoneSource {
    fn id(&self) -> &str {
        "sri_lanka"
    }

    fn load(&self) -> Result<Vec<RawZone>, RegistryError> {
        Ok(parse_zone_toml(EMBEDDED_ZONES_TOML)?.zones)
    }
}

/// A zone set read from a TOML file on disk.
#[derive(Debug, Clone)]
pub struct TomlFileZoneSource {
    id: String,
    path: PathBuf,
}

impl TomlFileZoneSource {
    /// Creates a source for the given file. The source id is the file stem.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let id = path
            .file_stem()
            .map_or_else(|| "zones".to_string(), |s| s.to_string_lossy().into_owned());
        Self { id, path }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ZoneSource for TomlFileZoneSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn load(&self) -> Result<Vec<RawZone>, RegistryError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|source| RegistryError::Io {
            path: self.path.clone(),
            source,
        })?;
        let set = parse_zone_toml(&contents)?;
        log::debug!(
            "Read zone set {} ({}) from {}",
            set.id,
            set.name,
            self.path.display()
        );
        Ok(set.zones)
    }
}

/// A source backed by records already in memory.
#[derive(Debug, Clone)]
pub struct MemoryZoneSource {
    id: String,
    zones: Vec<RawZone>,
}

impl MemoryZoneSource {
    /// Creates a source that yields the given records.
    #[must_use]
    pub fn new(id: impl Into<String>, zones: Vec<RawZone>) -> Self {
        Self {
            id: id.into(),
            zones,
        }
    }
}

impl ZoneSource for MemoryZoneSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn load(&self) -> Result<Vec<RawZone>, RegistryError> {
        Ok(self.zones.clone())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone as _, Utc};

    use super::*;

    #[test]
    fn embedded_set_parses() {
        let set = parse_zone_toml(EMBEDDED_ZONES_TOML).unwrap();
        assert_eq!(set.id, "sri_lanka");
        assert_eq!(set.zones.len(), 7);
    }

    #[test]
    fn embedded_records_have_required_fields() {
        for zone in EmbeddedZoneSource.load().unwrap() {
            let id = zone.id.as_deref().unwrap_or("?");
            assert!(zone.category.is_some(), "{id}: no category");
            assert!(zone.severity.is_some(), "{id}: no severity");
            assert!(zone.latitude.is_some(), "{id}: no latitude");
            assert!(zone.longitude.is_some(), "{id}: no longitude");
        }
    }

    #[test]
    fn missing_zone_list_is_empty() {
        let set = parse_zone_toml("id = \"empty\"\nname = \"Empty\"\n").unwrap();
        assert!(set.zones.is_empty());
    }

    #[test]
    fn reported_at_accepts_native_toml_datetime() {
        let set = parse_zone_toml(
            r#"
            id = "t"
            name = "Timestamps"

            [[zones]]
            id = "native"
            reported_at = 2024-06-01T10:00:00Z

            [[zones]]
            id = "quoted"
            reported_at = "2024-06-01T10:00:00Z"
            "#,
        )
        .unwrap();

        let expected = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
        assert_eq!(set.zones[0].reported_at, Some(expected));
        assert_eq!(set.zones[1].reported_at, Some(expected));
    }

    #[test]
    fn reported_at_without_offset_is_an_error() {
        let result = parse_zone_toml(
            r#"
            id = "t"
            name = "Timestamps"

            [[zones]]
            id = "local"
            reported_at = 2024-06-01T10:00:00
            "#,
        );
        assert!(matches!(result, Err(RegistryError::Toml(_))));
    }

    #[test]
    fn io_error_message_names_the_file() {
        let err = TomlFileZoneSource::new("/nonexistent/zones/lagos.toml")
            .load()
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("/nonexistent/zones/lagos.toml"), "{message}");
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(matches!(
            parse_zone_toml("id = "),
            Err(RegistryError::Toml(_))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let source = TomlFileZoneSource::new("/nonexistent/zones/lagos.toml");
        assert_eq!(source.id(), "lagos");
        match source.load() {
            Err(RegistryError::Io { path, .. }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/zones/lagos.toml"));
            }
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
