use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod commands;

use commands::{handle_check, handle_cities, handle_route, handle_stations, MetricArg, OutputFormat};

#[derive(Parser, Debug)]
#[command(author, version, about = "Transit map storage, routing, and validation")]
struct Cli {
    /// Override the map store database path.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Output format for command results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the cities with stored maps.
    Cities,
    /// List a stored city's stations.
    Stations {
        /// City whose map to inspect.
        #[arg(long)]
        city: String,
    },
    /// Plan a route between two stops in a stored city.
    Route {
        /// City whose map to ride.
        #[arg(long)]
        city: String,
        /// Starting stop name.
        #[arg(long)]
        from: String,
        /// Destination stop name.
        #[arg(long)]
        to: String,
        /// Weighting applied to tracks.
        #[arg(long, value_enum, default_value_t = MetricArg::Distance)]
        metric: MetricArg,
    },
    /// Validate a stored city's topology.
    Check {
        /// City whose map to validate.
        #[arg(long)]
        city: String,
    },
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Cities => handle_cities(cli.db.as_deref(), cli.format),
        Command::Stations { city } => handle_stations(cli.db.as_deref(), cli.format, &city),
        Command::Route {
            city,
            from,
            to,
            metric,
        } => handle_route(cli.db.as_deref(), cli.format, &city, &from, &to, metric.into()),
        Command::Check { city } => handle_check(cli.db.as_deref(), cli.format, &city),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
