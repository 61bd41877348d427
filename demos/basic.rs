//! Basic example of using the fleet-routes library.

use fleet_routes::config::Config;
use fleet_routes::problem::{BoundingBox, Point};
use fleet_routes::utils::{format_minutes, print_solution_summary, save_solution};
use fleet_routes::RoutePlanner;
use std::env;
use std::time::Instant;

/// Bogotá locality centres used to scatter sample deliveries.
const LOCALITIES: &[(&str, f64, f64)] = &[
    ("Chapinero", 4.6097, -74.0817),
    ("Usaquén", 4.6954, -74.0308),
    ("Teusaquillo", 4.6392, -74.0931),
    ("Barrios Unidos", 4.6609, -74.0687),
    ("Engativá", 4.6868, -74.1439),
    ("Suba", 4.7370, -74.0937),
    ("Fontibón", 4.6735, -74.1365),
    ("La Candelaria", 4.5980, -74.0760),
    ("Antonio Nariño", 4.5924, -74.0989),
    ("Puente Aranda", 4.6209, -74.1221),
];

fn sample_points() -> Vec<Point> {
    let mut points = Vec::new();

    // Three deliveries around each locality centre
    for (l, &(name, lat, lng)) in LOCALITIES.iter().enumerate() {
        for k in 0..3 {
            let offset = 0.004 * (k as f64 - 1.0);
            points.push(Point::new(
                format!("{}-{}", l, k),
                format!("{} #{}", name, k + 1),
                lat + offset,
                lng - offset / 2.0,
            ));
        }
    }

    points
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Truck count from the command line, default 4
    let args: Vec<String> = env::args().collect();
    let trucks = if args.len() > 1 { args[1].parse()? } else { 4 };

    let depot = Point::depot("depot", "Depot Central", 4.6159, -74.0698);
    let points = sample_points();
    println!("Planning {} deliveries with {} trucks", points.len(), trucks);

    let config = Config::new()
        .with_bounds(BoundingBox::BOGOTA)
        .with_cluster_seed(7)
        .with_exact_threshold(8)
        .with_two_opt_max_iterations(1000);

    let planner = RoutePlanner::new(config);

    let start_time = Instant::now();
    let solution = planner.plan(&points, &depot, trucks)?;
    println!("Planned in {:?}", start_time.elapsed());

    print_solution_summary(&solution);
    println!(
        "Fleet time if trucks ran back to back: {}",
        format_minutes(solution.total_time_minutes)
    );

    let output_path = "route_plan.txt";
    println!("Saving report to: {}", output_path);
    save_solution(&solution, output_path)?;

    Ok(())
}
