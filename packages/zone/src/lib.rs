#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Danger zone data sources and the read-only zone registry.
//!
//! A [`ZoneSource`] supplies raw zone records from wherever they live (the
//! embedded data set, a TOML file, or in the future a remote service). The
//! [`ZoneRegistry`] validates those records once and then hands out an
//! immutable, ordered slice of [`DangerZone`]s. Filtering and heatmap
//! synthesis only ever see that slice, so swapping the source requires no
//! change downstream.

pub mod registry;
pub mod source;

use std::path::PathBuf;

use safety_map_zone_models::{RawZone, ZoneError};

pub use registry::ZoneRegistry;
pub use safety_map_zone_models::DangerZone;
pub use source::{EmbeddedZoneSource, MemoryZoneSource, TomlFileZoneSource, ZoneSet};

/// Errors that can occur while loading a zone registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A zone file could not be read.
    #[error("failed to read zone file {}: {source}", .path.display())]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A zone file is not valid TOML or does not match the zone set shape.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A record failed validation.
    #[error("invalid zone at index {index} (id {id:?}): {source}")]
    InvalidZone {
        /// Position of the record in the source.
        index: usize,
        /// The record's id, if it had one.
        id: Option<String>,
        /// Why the record was rejected.
        #[source]
        source: ZoneError,
    },

    /// Two records share the same id.
    #[error("duplicate zone id {id:?}")]
    DuplicateId {
        /// The repeated id.
        id: String,
    },
}

/// Anything that can supply raw danger zone records.
pub trait ZoneSource: Send + Sync {
    /// Returns a unique identifier for this source (e.g. `"sri_lanka"`).
    fn id(&self) -> &str;

    /// Produces the raw, unvalidated zone records in display order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the records cannot be read or parsed.
    fn load(&self) -> Result<Vec<RawZone>, RegistryError>;
}
