//! `check` subcommand: validate a stored city's topology.
//!
//! Exits with a failing status when the map draws a diagnostic, so scripts
//! can gate on map validity.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;

use metrograph_lib::check;

use crate::commands::{load_city_map, OutputFormat};

pub fn handle_check(db: Option<&Path>, format: OutputFormat, city: &str) -> Result<ExitCode> {
    let map = load_city_map(db, city)?;

    match check(&map) {
        None => {
            match format {
                OutputFormat::Json => {
                    let report = serde_json::json!({ "city": city, "valid": true });
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                OutputFormat::Text => println!("OK"),
            }
            Ok(ExitCode::SUCCESS)
        }
        Some(diagnostic) => {
            match format {
                OutputFormat::Json => {
                    let report = serde_json::json!({
                        "city": city,
                        "valid": false,
                        "diagnostic": diagnostic.to_string(),
                    });
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                OutputFormat::Text => println!("{diagnostic}"),
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
