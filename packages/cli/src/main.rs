#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Command-line host for the safety map.
//!
//! Stands in for the map screen: loads the zone registry, applies a filter
//! selection, and prints markers, heatmap points, filter chips or a zone
//! detail sheet as JSON (or `GeoJSON`) for an external renderer.
//!
//! Logging goes to stderr via `pretty_env_logger`; set `RUST_LOG=debug` to
//! see filter and synthesis activity.

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use safety_map_filter::FilterSelection;
use safety_map_heatmap::{HeatmapConfig, to_feature_collection};
use safety_map_view::{MapType, SafetyMapState, ZoneMarker, markers_to_feature_collection};
use safety_map_zone::{TomlFileZoneSource, ZoneRegistry};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "safety_map", about = "Danger zone filtering and heatmap synthesis")]
struct Cli {
    /// Zone set TOML to load instead of the built-in zones
    /// (falls back to `SAFETY_MAP_ZONES`)
    #[arg(long, global = true, value_name = "PATH")]
    zones: Option<PathBuf>,

    /// Heatmap config TOML (falls back to `SAFETY_MAP_HEATMAP_CONFIG`)
    #[arg(long, global = true, value_name = "PATH")]
    heatmap_config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct FilterArgs {
    /// Category to show (repeatable); `all` or nothing shows every zone
    #[arg(long = "filter", value_name = "KEY")]
    filters: Vec<String>,
}

impl FilterArgs {
    fn selection(&self) -> FilterSelection {
        FilterSelection::from_keys(self.filters.iter().map(String::as_str))
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Geojson,
}

#[derive(Clone, Copy, ValueEnum)]
enum MapTypeArg {
    Standard,
    Satellite,
    Hybrid,
}

impl From<MapTypeArg> for MapType {
    fn from(arg: MapTypeArg) -> Self {
        match arg {
            MapTypeArg::Standard => Self::Standard,
            MapTypeArg::Satellite => Self::Satellite,
            MapTypeArg::Hybrid => Self::Hybrid,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print markers for the visible zones
    Zones {
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },
    /// Print heatmap points for the visible zones
    Heatmap {
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },
    /// Print the filter chips with zone counts
    Filters {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Print region, markers and heatmap in one frame
    Render {
        #[command(flatten)]
        filter: FilterArgs,
        /// Leave the heatmap layer out
        #[arg(long)]
        no_heatmap: bool,
        /// Base map imagery
        #[arg(long, value_enum, default_value = "standard")]
        map_type: MapTypeArg,
    },
    /// Print the detail sheet for one zone
    Detail {
        /// Zone id
        id: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let registry = match config::zones_path(cli.zones) {
        Some(path) => ZoneRegistry::load(&TomlFileZoneSource::new(path))?,
        None => ZoneRegistry::embedded()?,
    };
    let heatmap = match config::heatmap_config_path(cli.heatmap_config) {
        Some(path) => HeatmapConfig::load(&path)?,
        None => HeatmapConfig::default(),
    };

    let mut state = SafetyMapState::new(Arc::new(registry), heatmap);

    match cli.command {
        Commands::Zones { filter, format } => {
            state.set_selection(filter.selection());
            let markers: Vec<ZoneMarker> = state
                .visible_zones()
                .into_iter()
                .map(ZoneMarker::from)
                .collect();
            match format {
                OutputFormat::Json => print_json(&markers)?,
                OutputFormat::Geojson => print_json(&markers_to_feature_collection(&markers))?,
            }
        }
        Commands::Heatmap { filter, format } => {
            state.set_selection(filter.selection());
            let points = state.heatmap_points();
            log::info!(
                "{} zones visible, {} heatmap points",
                state.visible_zones().len(),
                points.len()
            );
            match format {
                OutputFormat::Json => print_json(&points)?,
                OutputFormat::Geojson => print_json(&to_feature_collection(&points))?,
            }
        }
        Commands::Filters { filter } => {
            state.set_selection(filter.selection());
            print_json(&state.filter_options())?;
        }
        Commands::Render {
            filter,
            no_heatmap,
            map_type,
        } => {
            state.set_selection(filter.selection());
            state.set_heatmap_visible(!no_heatmap);
            state.set_map_type(map_type.into());
            print_json(&state.render())?;
        }
        Commands::Detail { id } => {
            print_json(&state.zone_detail(&id, chrono::Utc::now())?)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
