//! Filter chips shown above the map.

use safety_map_zone_models::{DangerCategory, DangerZone};
use serde::Serialize;

use crate::{FilterKey, FilterSelection};

const ALL_LABEL: &str = "All Zones";
const ALL_COLOR: &str = "#20B2AA";

/// One filter chip: what it toggles, how it looks, and how many zones it
/// covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOption {
    /// Key passed to [`FilterSelection::toggle`] when tapped.
    pub key: FilterKey,
    /// Chip label.
    pub label: &'static str,
    /// Chip color as a hex string.
    pub color: &'static str,
    /// Number of zones this chip covers.
    pub count: usize,
    /// Whether the chip is currently on.
    pub selected: bool,
}

/// Builds the chip list: `all` first, then every category in declaration
/// order. Counts are taken over the unfiltered `zones`.
#[must_use]
pub fn filter_options(zones: &[DangerZone], selection: &FilterSelection) -> Vec<FilterOption> {
    let mut options = Vec::with_capacity(DangerCategory::all().len() + 1);

    options.push(FilterOption {
        key: FilterKey::All,
        label: ALL_LABEL,
        color: ALL_COLOR,
        count: zones.len(),
        selected: selection.is_all(),
    });

    for &category in DangerCategory::all() {
        let key = FilterKey::Category(category);
        options.push(FilterOption {
            selected: selection.contains(&key),
            key,
            label: category.label(),
            color: category.color(),
            count: zones.iter().filter(|z| z.category == category).count(),
        });
    }

    options
}
