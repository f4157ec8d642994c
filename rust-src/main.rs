//! Lifestyle tracker CLI
//!
//! Daily health logging, BMI tracking, charts and monthly PDF reports.

mod aggregation;
mod cli;
mod commands;
mod config;
mod error;
mod models;
mod storage;
mod visualization;

use tracing_subscriber::EnvFilter;


fn main() {
    init_logging();

    if let Err(e) = cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}


/// Log to stderr so prompts on stdout stay readable. Level from `LSTRACK_LOG`.
fn init_logging() {
    let filter = EnvFilter::try_from_env("LSTRACK_LOG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
