//! The validated, read-only list of danger zones.

use std::collections::BTreeSet;

use safety_map_zone_models::{DangerZone, RawZone};

use crate::{EmbeddedZoneSource, RegistryError, ZoneSource};

/// An immutable, ordered list of validated danger zones.
///
/// Constructed once from a [`ZoneSource`] and never mutated afterwards.
/// Zone ids are guaranteed unique.
#[derive(Debug, Clone)]
pub struct ZoneRegistry {
    source_id: String,
    zones: Vec<DangerZone>,
}

impl ZoneRegistry {
    /// Loads and validates every record from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the source fails, any record is
    /// malformed, or two records share an id.
    pub fn load(source: &dyn ZoneSource) -> Result<Self, RegistryError> {
        let raw = source.load()?;
        let registry = Self::from_raw(source.id(), raw)?;
        log::info!(
            "Loaded {} danger zones from source {}",
            registry.len(),
            registry.source_id
        );
        Ok(registry)
    }

    /// Loads the zone set shipped with the application.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the embedded data is invalid.
    pub fn embedded() -> Result<Self, RegistryError> {
        Self::load(&EmbeddedZoneSource)
    }

    /// Validates raw records into a registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidZone`] for the first malformed record
    /// or [`RegistryError::DuplicateId`] for the first repeated id.
    pub fn from_raw(
        source_id: impl Into<String>,
        raw: Vec<RawZone>,
    ) -> Result<Self, RegistryError> {
        let zones = raw
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let id = record.id.clone();
                record
                    .validate()
                    .map_err(|source| RegistryError::InvalidZone { index, id, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_zones(source_id, zones)
    }

    /// Wraps already-validated zones, checking id uniqueness.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateId`] for the first repeated id.
    pub fn from_zones(
        source_id: impl Into<String>,
        zones: Vec<DangerZone>,
    ) -> Result<Self, RegistryError> {
        let mut seen = BTreeSet::new();
        for zone in &zones {
            if !seen.insert(zone.id.as_str()) {
                return Err(RegistryError::DuplicateId {
                    id: zone.id.clone(),
                });
            }
        }

        Ok(Self {
            source_id: source_id.into(),
            zones,
        })
    }

    /// Identifier of the source this registry was loaded from.
    #[must_use]
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// All zones in source order.
    #[must_use]
    pub fn zones(&self) -> &[DangerZone] {
        &self.zones
    }

    /// Looks up a zone by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&DangerZone> {
        self.zones.iter().find(|zone| zone.id == id)
    }

    /// Number of zones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Whether the registry has no zones.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}
