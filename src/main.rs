mod calc;
mod cmd;
mod data;
mod ui;

use chrono::{Datelike, Local};
use clap::{Parser, Subcommand};
use cmd::request::RequestArgs;
use data::RegionSelector;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "leaveplan", about = "plan leave around weekends and bank holidays")]
struct Cli {
    /// Path to the data directory containing config and data files (default: ./config)
    #[arg(long, default_value = "./config")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize data files with sample settings
    Init,
    /// List holidays for a year
    Holidays {
        /// Calendar year (default: current year)
        #[arg(short, long)]
        year: Option<i32>,
        /// Region to list (default: settings.region)
        #[arg(short, long, value_enum)]
        region: Option<RegionSelector>,
    },
    /// Validate a leave request without saving it
    Check(RequestArgs),
    /// Validate and book a leave request
    Request(RequestArgs),
    /// List all leave requests
    Requests,
    /// Cancel a leave request and return its days to the balance
    Cancel {
        /// Request id as shown by `requests`
        id: String,
    },
    /// Show the leave balance
    Balance,
    /// Per-type leave statistics
    Stats,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "leaveplan=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Resolve data_dir to an absolute path so file I/O works
    // regardless of future directory changes within the process.
    let data_dir = if cli.data_dir.is_absolute() {
        cli.data_dir.clone()
    } else {
        std::env::current_dir()?.join(&cli.data_dir)
    };
    data::persistence::set_data_dir(data_dir.clone());

    // Auto-init when the data directory is missing or empty and the user did not
    // explicitly invoke the `init` subcommand.
    let is_init_command = matches!(cli.command, Some(Commands::Init));
    if !is_init_command && dir_needs_init(&data_dir) {
        eprintln!(
            "Data directory '{}' is missing or empty, running init...",
            data_dir.display()
        );
        cmd::init::run()?;
    }

    let today = Local::now().date_naive();
    match cli.command {
        None => cmd::root::run(today),
        Some(Commands::Init) => cmd::init::run(),
        Some(Commands::Holidays { year, region }) => {
            cmd::holidays::run(year.unwrap_or_else(|| today.year()), region)
        }
        Some(Commands::Check(args)) => cmd::request::check(args, today),
        Some(Commands::Request(args)) => cmd::request::run(args, today),
        Some(Commands::Requests) => cmd::requests::run(),
        Some(Commands::Cancel { id }) => cmd::requests::cancel(&id),
        Some(Commands::Balance) => cmd::balance::run(),
        Some(Commands::Stats) => cmd::stats::run(),
    }
}

/// Returns true when `dir` does not exist or exists but contains no files.
fn dir_needs_init(dir: &std::path::Path) -> bool {
    if !dir.exists() {
        return true;
    }
    dir.read_dir()
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}
