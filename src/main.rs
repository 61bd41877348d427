//! Command-line front-end: read points as JSON, plan routes, write JSON.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use log::info;

use fleet_routes::config::Config;
use fleet_routes::problem::Point;
use fleet_routes::utils::{print_solution_summary, save_solution};
use fleet_routes::RoutePlanner;

/// Plan depot-based delivery routes for a small fleet.
#[derive(Debug, Parser)]
#[command(name = "fleet-routes", version, about)]
struct Args {
    /// JSON array of points: `[{"id": "...", "latitude": .., "longitude": ..}, ...]`
    #[arg(short, long)]
    input: PathBuf,

    /// Depot latitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    depot_lat: f64,

    /// Depot longitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    depot_lng: f64,

    /// Depot display name
    #[arg(long, default_value = "Depot")]
    depot_name: String,

    /// Number of trucks
    #[arg(short, long, default_value_t = 3)]
    trucks: usize,

    /// Optional JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the clustering seed
    #[arg(long)]
    seed: Option<u64>,

    /// Write the JSON solution here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write a plain-text report
    #[arg(long)]
    report: Option<PathBuf>,

    /// Print a per-truck summary
    #[arg(long)]
    summary: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::new(),
    };
    if let Some(seed) = args.seed {
        config = config.with_cluster_seed(seed);
    }

    info!("loading points from {}", args.input.display());
    let raw = fs::read_to_string(&args.input)?;
    let points: Vec<Point> = serde_json::from_str(&raw)?;
    let depot = Point::depot("depot", args.depot_name.as_str(), args.depot_lat, args.depot_lng);

    let planner = RoutePlanner::new(config);
    let solution = planner.plan(&points, &depot, args.trucks)?;

    let json = serde_json::to_string_pretty(&solution)?;
    match &args.output {
        Some(path) => {
            fs::write(path, json)?;
            info!("solution written to {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", json)?;
        }
    }

    if let Some(path) = &args.report {
        save_solution(&solution, path)?;
        info!("report written to {}", path.display());
    }

    if args.summary {
        print_solution_summary(&solution);
    }

    Ok(())
}
