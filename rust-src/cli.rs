//! CLI definitions using clap.

use std::io;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};

use crate::commands;
use crate::config::{Settings, DEFAULT_CHARTS_DIR, DEFAULT_DATA_FILE, DEFAULT_REPORTS_DIR};
use crate::models::Measurements;
use crate::storage::RecordStore;


/// Lifestyle tracker - log daily health metrics and build monthly reports.
///
/// Without a subcommand the interactive menu starts.
#[derive(Parser)]
#[command(name = "lstrack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    paths: PathArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}


#[derive(Args)]
struct PathArgs {
    /// CSV file holding recorded entries
    #[arg(long, global = true, env = "LSTRACK_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    /// Directory for monthly PDF reports
    #[arg(long, global = true, env = "LSTRACK_REPORTS_DIR", default_value = DEFAULT_REPORTS_DIR)]
    reports_dir: PathBuf,

    /// Directory for chart images
    #[arg(long, global = true, env = "LSTRACK_CHARTS_DIR", default_value = DEFAULT_CHARTS_DIR)]
    charts_dir: PathBuf,
}


impl From<PathArgs> for Settings {
    fn from(args: PathArgs) -> Self {
        Settings {
            data_file: args.data_file,
            reports_dir: args.reports_dir,
            charts_dir: args.charts_dir,
        }
    }
}


#[derive(Subcommand)]
enum Commands {
    /// Start the interactive menu (default)
    Shell,

    /// Record one day's measurements
    Add {
        /// Sleep in hours
        #[arg(long)]
        sleep: f64,

        /// Step count
        #[arg(long)]
        steps: u32,

        /// Water intake in liters
        #[arg(long)]
        water: f64,

        /// Weight in kg
        #[arg(long)]
        weight: f64,

        /// Height in cm
        #[arg(long)]
        height: f64,

        /// Screen time in hours
        #[arg(long)]
        screen_time: f64,

        /// Calories intake
        #[arg(long)]
        calories: f64,

        /// Entry date as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show monthly averages and recommendations
    Analyze {
        #[command(flatten)]
        month: MonthArgs,

        /// Print averages as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the monthly PDF report
    Report {
        #[command(flatten)]
        month: MonthArgs,
    },

    /// Export BMI category, sleep vs BMI and steps vs calories charts
    Charts {
        /// Open the images after export
        #[arg(long)]
        open: bool,
    },
}


#[derive(Args)]
struct MonthArgs {
    /// Year (YYYY)
    #[arg(short, long, value_parser = clap::value_parser!(i32).range(1..=9999))]
    year: i32,

    /// Month (1-12)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: u32,
}


/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::from(cli.paths);
    tracing::debug!(?settings, "resolved settings");

    let mut store = RecordStore::open(&settings.data_file)?;
    let mut stdout = io::stdout();

    match cli.command {
        None | Some(Commands::Shell) => {
            let stdin = io::stdin();
            commands::shell::Shell::new(&settings, store, stdin.lock(), stdout).run()?;
        }
        Some(Commands::Add {
            sleep,
            steps,
            water,
            weight,
            height,
            screen_time,
            calories,
            date,
        }) => {
            let measurements = Measurements {
                sleep,
                steps,
                water_intake: water,
                weight,
                height,
                screen_time,
                calories_intake: calories,
            };
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            commands::add::run(&mut store, date, measurements, &mut stdout)?;
        }
        Some(Commands::Analyze { month, json }) => {
            commands::analyze::run(&store, month.year, month.month, json, &mut stdout)?;
        }
        Some(Commands::Report { month }) => {
            commands::report::run(&settings, &store, month.year, month.month, &mut stdout)?;
        }
        Some(Commands::Charts { open }) => {
            commands::charts::run(&settings, &store, open, &mut stdout)?;
        }
    }

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_without_subcommand() {
        let cli = Cli::try_parse_from(["lstrack"]).unwrap();
        assert!(cli.command.is_none());
        let settings = Settings::from(cli.paths);
        assert_eq!(settings.data_file, PathBuf::from(DEFAULT_DATA_FILE));
    }

    #[test]
    fn test_month_range_enforced() {
        assert!(Cli::try_parse_from(["lstrack", "analyze", "--year", "2024", "--month", "13"]).is_err());
        assert!(Cli::try_parse_from(["lstrack", "report", "-y", "2024", "-m", "12"]).is_ok());
    }

    #[test]
    fn test_add_parses_date() {
        let cli = Cli::try_parse_from([
            "lstrack", "add", "--sleep", "7", "--steps", "8000", "--water", "2",
            "--weight", "70", "--height", "175", "--screen-time", "3", "--calories", "2000",
            "--date", "2024-01-31",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Add { date, steps, .. }) => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 31));
                assert_eq!(steps, 8000);
            }
            _ => panic!("expected add command"),
        }
    }
}
