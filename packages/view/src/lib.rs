#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! View state for the safety map screen.
//!
//! [`SafetyMapState`] owns the user's [`FilterSelection`] and recomputes the
//! marker list and heatmap points from scratch whenever it is asked to
//! render. The zone registry is shared and never modified.

pub mod region;
pub mod render;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use safety_map_filter::{FilterKey, FilterOption, FilterSelection, filter_options, filter_zones};
use safety_map_heatmap::{HeatmapConfig, HeatmapPoint, synthesize};
use safety_map_zone::ZoneRegistry;
use safety_map_zone_models::DangerZone;

pub use region::MapRegion;
pub use render::{MapRender, MapType, ZoneDetail, ZoneMarker, markers_to_feature_collection};

/// Errors raised by view operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    /// No zone with this id exists in the registry.
    #[error("no danger zone with id {id:?}")]
    UnknownZone {
        /// The requested id.
        id: String,
    },
}

/// State behind one safety map screen.
#[derive(Debug, Clone)]
pub struct SafetyMapState {
    registry: Arc<ZoneRegistry>,
    selection: FilterSelection,
    heatmap: HeatmapConfig,
    show_heatmap: bool,
    map_type: MapType,
}

impl SafetyMapState {
    /// Creates the state with every category shown, the heatmap on and the
    /// standard base map.
    #[must_use]
    pub fn new(registry: Arc<ZoneRegistry>, heatmap: HeatmapConfig) -> Self {
        Self {
            registry,
            selection: FilterSelection::all(),
            heatmap,
            show_heatmap: true,
            map_type: MapType::default(),
        }
    }

    /// The zone registry backing this screen.
    #[must_use]
    pub fn registry(&self) -> &ZoneRegistry {
        &self.registry
    }

    /// The current filter selection.
    #[must_use]
    pub const fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    /// Replaces the filter selection.
    pub fn set_selection(&mut self, selection: FilterSelection) {
        self.selection = selection;
    }

    /// Applies a tap on filter chip `key`.
    pub fn toggle_filter(&mut self, key: impl Into<FilterKey>) {
        self.selection.toggle(key);
        log::debug!("Filter selection is now {}", self.selection);
    }

    /// Clears every category restriction.
    pub fn select_all(&mut self) {
        self.selection = FilterSelection::all();
    }

    /// Whether the heatmap layer is shown.
    #[must_use]
    pub const fn heatmap_visible(&self) -> bool {
        self.show_heatmap
    }

    /// Shows or hides the heatmap layer.
    pub fn set_heatmap_visible(&mut self, visible: bool) {
        self.show_heatmap = visible;
    }

    /// The base map imagery.
    #[must_use]
    pub const fn map_type(&self) -> MapType {
        self.map_type
    }

    /// Switches the base map imagery.
    pub fn set_map_type(&mut self, map_type: MapType) {
        self.map_type = map_type;
    }

    /// Zones passing the current selection, in registry order.
    #[must_use]
    pub fn visible_zones(&self) -> Vec<&DangerZone> {
        filter_zones(self.registry.zones(), &self.selection)
    }

    /// Heatmap points for the visible zones, or nothing if the layer is off.
    #[must_use]
    pub fn heatmap_points(&self) -> Vec<HeatmapPoint> {
        if !self.show_heatmap {
            return Vec::new();
        }
        synthesize(self.visible_zones(), &self.heatmap)
    }

    /// The filter chips with counts and selected flags.
    #[must_use]
    pub fn filter_options(&self) -> Vec<FilterOption> {
        filter_options(self.registry.zones(), &self.selection)
    }

    /// Builds a full frame for the map widget.
    ///
    /// The camera frames the visible zones, falling back to
    /// [`MapRegion::SRI_LANKA`] when nothing is visible.
    #[must_use]
    pub fn render(&self) -> MapRender {
        let visible = self.visible_zones();
        let region = MapRegion::fit(&visible).unwrap_or_default();
        let markers = visible.iter().copied().map(ZoneMarker::from).collect();
        let (heatmap, heatmap_style) = if self.show_heatmap {
            (
                synthesize(visible.iter().copied(), &self.heatmap),
                Some(self.heatmap.style.clone()),
            )
        } else {
            (Vec::new(), None)
        };

        MapRender {
            region,
            map_type: self.map_type,
            markers,
            heatmap,
            heatmap_style,
        }
    }

    /// Detail sheet for zone `id`, with recency relative to `now`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::UnknownZone`] if no zone has this id.
    pub fn zone_detail(&self, id: &str, now: DateTime<Utc>) -> Result<ZoneDetail, ViewError> {
        self.registry
            .get(id)
            .map(|zone| ZoneDetail::new(zone, now))
            .ok_or_else(|| ViewError::UnknownZone { id: id.to_string() })
    }
}
