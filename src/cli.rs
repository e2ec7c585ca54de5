use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cropsense", version, about = "Crop advisory dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override SQLite data directory
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Re-run interactive setup
    Init,
    /// Validate config and test connections
    Check,
    /// Refresh once and print the advisory report
    Report {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage crop records
    #[command(subcommand)]
    Crop(CropCommand),
    /// List the insight rules in evaluation order
    Rules,
}

#[derive(Subcommand)]
pub enum CropCommand {
    /// Record a newly planted crop
    Add {
        name: String,
        /// Planting date (YYYY-MM-DD)
        #[arg(long)]
        planted: NaiveDate,
        /// good, moderate or poor
        #[arg(long, default_value = "good")]
        health: String,
    },
    /// List crops with their age and status
    List,
    /// Mark a crop as harvested
    Harvest { id: i64 },
    /// Delete a crop record
    Remove { id: i64 },
}

impl Cli {
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "cropsense=debug",
            _ => "cropsense=trace",
        }
    }
}
