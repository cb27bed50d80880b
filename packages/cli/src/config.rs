//! Input resolution: command-line flags first, then environment variables.

use std::path::PathBuf;

/// Environment variable naming a zone set TOML file.
pub const ZONES_ENV: &str = "SAFETY_MAP_ZONES";

/// Environment variable naming a heatmap config TOML file.
pub const HEATMAP_CONFIG_ENV: &str = "SAFETY_MAP_HEATMAP_CONFIG";

/// Picks the zone file: `--zones` if given, else [`ZONES_ENV`].
#[must_use]
pub fn zones_path(flag: Option<PathBuf>) -> Option<PathBuf> {
    resolve(flag, std::env::var(ZONES_ENV).ok())
}

/// Picks the heatmap config file: `--heatmap-config` if given, else
/// [`HEATMAP_CONFIG_ENV`].
#[must_use]
pub fn heatmap_config_path(flag: Option<PathBuf>) -> Option<PathBuf> {
    resolve(flag, std::env::var(HEATMAP_CONFIG_ENV).ok())
}

fn resolve(flag: Option<PathBuf>, env: Option<String>) -> Option<PathBuf> {
    flag.or_else(|| {
        env.filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
    })
}
