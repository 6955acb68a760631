//! `cities` subcommand: list the cities with stored maps.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;

use crate::commands::{stored_cities, OutputFormat};

pub fn handle_cities(db: Option<&Path>, format: OutputFormat) -> Result<ExitCode> {
    let cities = stored_cities(db)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&cities)?),
        OutputFormat::Text if cities.is_empty() => println!("No stored maps."),
        OutputFormat::Text => {
            for city in &cities {
                println!("{city}");
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
