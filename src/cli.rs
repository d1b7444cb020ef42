use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sowplan",
    version,
    about = "Plan sowing, hardening and transplanting from a harvest date"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Plant dataset (JSON or YAML), overrides plants_file from config
    #[arg(short, long, global = true)]
    pub plants: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sow, hardening and transplant dates for each plant
    Schedule(HarvestArgs),
    /// Check a harvest date against each plant's harvest window
    Check {
        #[command(flatten)]
        harvest: HarvestArgs,

        /// Treat this date as today (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },
    /// Flag schedule dates that fall outside their recommended windows
    Warnings(HarvestArgs),
    /// List recognized month names and day counts
    Months,
    /// Write a default config file
    Init {
        /// Where to write it (defaults to ~/.config/sowplan/config.yaml)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Args)]
pub struct HarvestArgs {
    /// Desired harvest date (YYYY-MM-DD)
    #[arg(long = "harvest")]
    pub harvest_date: String,

    /// Restrict to these plant ids (repeatable)
    #[arg(long = "plant")]
    pub plant_ids: Vec<i64>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}
