//! `stations` subcommand: list a stored city's stations.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;

use metrograph_lib::NodeFilter;

use crate::commands::{load_city_map, OutputFormat};

pub fn handle_stations(db: Option<&Path>, format: OutputFormat, city: &str) -> Result<ExitCode> {
    let map = load_city_map(db, city)?;
    let stations = map.all_nodes(NodeFilter::Stations);

    match format {
        OutputFormat::Json => {
            let rows: Vec<serde_json::Value> = stations
                .iter()
                .map(|node| {
                    serde_json::json!({
                        "name": node.name,
                        "x": node.coordinates.x,
                        "y": node.coordinates.y,
                        "zone": node.zone,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Text => {
            for node in &stations {
                match &node.zone {
                    Some(zone) => println!("{} {} zone {}", node.name, node.coordinates, zone),
                    None => println!("{} {}", node.name, node.coordinates),
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
