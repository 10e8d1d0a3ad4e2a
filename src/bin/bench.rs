//! Benchmark for solve time on the large demo-data preset.
//!
//! Run with: cargo run --release --bin bench

use std::time::Instant;

use shift_scheduler::demo_data::{self, DemoData};
use shift_scheduler::solver;

fn main() {
    let request = demo_data::generate(DemoData::Large);
    let num_employees = request.employees.len();
    let config = request
        .into_config()
        .expect("the large demo preset always validates");

    println!("Benchmark: constraint model solve");
    println!("  Employees: {}", num_employees);
    println!("  Days: {}", config.num_days());
    println!();

    let start = Instant::now();
    let response = solver::generate_schedule(config, solver::DEFAULT_MAX_TIME_SECONDS)
        .expect("the large demo preset is solvable");
    let elapsed = start.elapsed();

    println!("Results:");
    println!("  Status: {:?}", response.status);
    println!("  Time: {:.2?}", elapsed);
    println!(
        "  Coverage days: {}",
        response.statistics.daily_coverage.len()
    );
}
