#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Category filtering for the safety map.
//!
//! A [`FilterSelection`] is the set of filter keys the user has switched on.
//! The reserved key `all` means "no restriction" and never coexists with
//! other keys; the selection is never empty. [`filter_zones`] reduces a zone
//! list to the selected categories without reordering it.

pub mod options;

use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use safety_map_zone_models::{DangerCategory, DangerZone};
use serde::{Deserialize, Serialize};

pub use options::{FilterOption, filter_options};

/// The reserved key meaning "show every category".
pub const ALL_KEY: &str = "all";

/// One toggleable filter key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum FilterKey {
    /// No category restriction.
    All,
    /// Only zones of this category.
    Category(DangerCategory),
    /// A key that names no known category. It can be selected but matches
    /// no zone.
    Unrecognized(String),
}

impl From<&str> for FilterKey {
    fn from(key: &str) -> Self {
        if key == ALL_KEY {
            return Self::All;
        }
        key.parse::<DangerCategory>()
            .map_or_else(|_| Self::Unrecognized(key.to_string()), Self::Category)
    }
}

impl From<String> for FilterKey {
    fn from(key: String) -> Self {
        Self::from(key.as_str())
    }
}

impl From<DangerCategory> for FilterKey {
    fn from(category: DangerCategory) -> Self {
        Self::Category(category)
    }
}

impl From<FilterKey> for String {
    fn from(key: FilterKey) -> Self {
        key.to_string()
    }
}

impl FromStr for FilterKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_KEY),
            Self::Category(category) => f.write_str(category.as_ref()),
            Self::Unrecognized(key) => f.write_str(key),
        }
    }
}

/// The set of filter keys currently selected.
///
/// Invariants: never empty, and [`FilterKey::All`] is either the only key or
/// absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<FilterKey>", from = "Vec<FilterKey>")]
pub struct FilterSelection {
    keys: BTreeSet<FilterKey>,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self::all()
    }
}

impl FilterSelection {
    /// The unrestricted selection `{all}`.
    #[must_use]
    pub fn all() -> Self {
        Self {
            keys: BTreeSet::from([FilterKey::All]),
        }
    }

    /// Builds a selection from arbitrary keys.
    ///
    /// An empty list, or any list containing `all`, yields `{all}`.
    #[must_use]
    pub fn from_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<FilterKey>,
    {
        let keys: BTreeSet<FilterKey> = keys.into_iter().map(Into::into).collect();
        if keys.is_empty() || keys.contains(&FilterKey::All) {
            return Self::all();
        }
        for key in &keys {
            warn_if_unrecognized(key);
        }
        Self { keys }
    }

    /// Whether this is the unrestricted selection.
    #[must_use]
    pub fn is_all(&self) -> bool {
        self.keys.contains(&FilterKey::All)
    }

    /// Whether `key` is currently selected.
    #[must_use]
    pub fn contains(&self, key: &FilterKey) -> bool {
        self.keys.contains(key)
    }

    /// Whether zones of `category` pass this selection.
    #[must_use]
    pub fn includes_category(&self, category: DangerCategory) -> bool {
        self.is_all() || self.keys.contains(&FilterKey::Category(category))
    }

    /// Whether `zone` passes this selection.
    #[must_use]
    pub fn matches(&self, zone: &DangerZone) -> bool {
        self.includes_category(zone.category)
    }

    /// The selected keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &FilterKey> {
        self.keys.iter()
    }

    /// Applies a user tap on `key`.
    ///
    /// Tapping `all` resets to `{all}`. Tapping any other key flips it,
    /// dropping `all` when a key is added. If nothing is left selected the
    /// selection falls back to `{all}`.
    pub fn toggle(&mut self, key: impl Into<FilterKey>) {
        let key = key.into();
        if key == FilterKey::All {
            *self = Self::all();
            return;
        }

        if !self.keys.remove(&key) {
            warn_if_unrecognized(&key);
            self.keys.remove(&FilterKey::All);
            self.keys.insert(key);
        }

        if self.keys.is_empty() {
            *self = Self::all();
        }
    }

    /// Returns a copy of this selection with `key` toggled.
    #[must_use]
    pub fn toggled(&self, key: impl Into<FilterKey>) -> Self {
        let mut next = self.clone();
        next.toggle(key);
        next
    }
}

impl From<Vec<FilterKey>> for FilterSelection {
    fn from(keys: Vec<FilterKey>) -> Self {
        Self::from_keys(keys)
    }
}

impl From<FilterSelection> for Vec<FilterKey> {
    fn from(selection: FilterSelection) -> Self {
        selection.keys.into_iter().collect()
    }
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<String> = self.keys.iter().map(ToString::to_string).collect();
        write!(f, "{{{}}}", keys.join(", "))
    }
}

fn warn_if_unrecognized(key: &FilterKey) {
    if let FilterKey::Unrecognized(key) = key {
        log::warn!("Unrecognized filter key {key:?}; it matches no zones");
    }
}

/// Returns the zones that pass `selection`, in their original order.
#[must_use]
pub fn filter_zones<'a>(
    zones: &'a [DangerZone],
    selection: &FilterSelection,
) -> Vec<&'a DangerZone> {
    if selection.is_all() {
        return zones.iter().collect();
    }

    let visible: Vec<&DangerZone> = zones
        .iter()
        .filter(|zone| selection.matches(zone))
        .collect();
    log::debug!(
        "Filter {selection} kept {} of {} zones",
        visible.len(),
        zones.len()
    );
    visible
}
