//! Subcommand handlers for the metrograph CLI.
//!
//! Each module owns one subcommand so `main.rs` stays a thin parse-and-
//! dispatch layer. Shared flag types and store helpers live here.

pub mod check;
pub mod cities;
pub mod route;
pub mod stations;

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;

use metrograph_lib::{list_cities, load_map, open_store, resolve_store_path, Map, Metric};

pub use check::handle_check;
pub use cities::handle_cities;
pub use route::handle_route;
pub use stations::handle_stations;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-friendly text.
    Text,
    /// Machine-readable JSON.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        };
        f.write_str(value)
    }
}

/// Track weighting, as exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MetricArg {
    /// Shortest physical track length.
    Distance,
    /// Cheapest total fare.
    Cost,
}

impl fmt::Display for MetricArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            MetricArg::Distance => "distance",
            MetricArg::Cost => "cost",
        };
        f.write_str(value)
    }
}

impl From<MetricArg> for Metric {
    fn from(value: MetricArg) -> Self {
        match value {
            MetricArg::Distance => Metric::Distance,
            MetricArg::Cost => Metric::Cost,
        }
    }
}

/// Open the store and load one city's map.
pub(crate) fn load_city_map(db: Option<&Path>, city: &str) -> Result<Map> {
    let path = resolve_store_path(db).context("failed to resolve the map store path")?;
    let connection = open_store(&path)
        .with_context(|| format!("failed to open the map store at {}", path.display()))?;
    let map = load_map(&connection, city)
        .with_context(|| format!("failed to load the stored map for {city}"))?;
    Ok(map)
}

/// Open the store and list the stored cities.
pub(crate) fn stored_cities(db: Option<&Path>) -> Result<Vec<String>> {
    let path = resolve_store_path(db).context("failed to resolve the map store path")?;
    let connection = open_store(&path)
        .with_context(|| format!("failed to open the map store at {}", path.display()))?;
    Ok(list_cities(&connection)?)
}
