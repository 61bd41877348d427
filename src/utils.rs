//! Reporting helpers for planned routes.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::metrics::{efficiency, fuel_estimate, FuelModel};
use crate::solution::Solution;

/// Format a duration given in minutes as hours and minutes.
pub fn format_minutes(minutes: f64) -> String {
    let total = minutes.max(0.0).round() as u64;
    format!("{}h {:02}m", total / 60, total % 60)
}

/// Write a plain-text report of a solution.
pub fn write_report<W: Write>(solution: &Solution, out: &mut W) -> io::Result<()> {
    writeln!(out, "Route plan")?;
    writeln!(out, "Total Distance: {:.2} km", solution.total_distance_km)?;
    writeln!(
        out,
        "Total Time: {}",
        format_minutes(solution.total_time_minutes)
    )?;
    writeln!(out, "Number of Routes: {}", solution.routes.len())?;
    writeln!(out)?;

    let fuel = FuelModel::default();

    for (i, route) in solution.routes.iter().enumerate() {
        write!(out, "Route #{}: ", i + 1)?;

        if route.is_empty() {
            writeln!(out, "Empty")?;
            continue;
        }

        let names: Vec<&str> = route
            .stops
            .iter()
            .map(|s| if s.name.is_empty() { s.id.as_str() } else { s.name.as_str() })
            .collect();
        writeln!(out, "{}", names.join(" -> "))?;

        let shape = efficiency(route);
        let estimate = fuel_estimate(route, &fuel);
        writeln!(out, "  Stops: {}", route.metrics.stop_count)?;
        writeln!(out, "  Distance: {:.2} km", route.metrics.total_distance_km)?;
        writeln!(
            out,
            "  Time: {}",
            format_minutes(route.metrics.estimated_time_minutes)
        )?;
        writeln!(out, "  Detour Factor: {:.2}", shape.detour_factor)?;
        writeln!(out, "  Fuel: {:.1} l", estimate.liters)?;
        writeln!(out)?;
    }

    Ok(())
}

/// Save a solution report to a file.
pub fn save_solution<P: AsRef<Path>>(solution: &Solution, path: P) -> io::Result<()> {
    let mut file = File::create(path)?;
    write_report(solution, &mut file)
}

/// Print a one-line-per-route summary to the console.
pub fn print_solution_summary(solution: &Solution) {
    println!(
        "{} routes, {:.2} km, {}",
        solution.routes.len(),
        solution.total_distance_km,
        format_minutes(solution.total_time_minutes)
    );

    for (i, route) in solution.routes.iter().enumerate() {
        println!(
            "  Truck {}: {} stops, {:.2} km, {}",
            i + 1,
            route.metrics.stop_count,
            route.metrics.total_distance_km,
            format_minutes(route.metrics.estimated_time_minutes)
        );
    }
}
