//! `route` subcommand: plan a route through a stored city.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;

use metrograph_lib::{plan_route, Metric, RouteRequest, RouteSummary};

use crate::commands::{load_city_map, OutputFormat};

pub fn handle_route(
    db: Option<&Path>,
    format: OutputFormat,
    city: &str,
    from: &str,
    to: &str,
    metric: Metric,
) -> Result<ExitCode> {
    let map = load_city_map(db, city)?;

    let request = RouteRequest::new(from, to, metric);
    let plan = plan_route(&map, &request)?;
    let summary = RouteSummary::from_plan(&map, &plan)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Text => print!("{}", summary.render_plain()),
    }

    Ok(ExitCode::SUCCESS)
}
