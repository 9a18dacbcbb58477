//! CLI argument parsing for farmstat

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::stats::Statistic;

#[derive(Parser, Debug)]
#[command(name = "farmstat")]
#[command(version)]
#[command(about = "Build farm telemetry reporting", long_about = None)]
pub struct Cli {
    /// Telemetry snapshot to report on (JSON)
    #[arg(short = 'd', long = "data", value_name = "PATH")]
    pub data: PathBuf,

    /// Enable debug logging to stderr
    #[arg(long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Every command maps to one typed handler with a fixed argument set.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all workers
    Workers,

    /// List all builders with their categories
    Builders,

    /// List build ids selected by category and/or builder name pattern
    Builds(SelectionArgs),

    /// Show the stored fields of specific builds
    BuildInfo {
        /// Build ids to look up
        #[arg(value_name = "ID", required = true)]
        ids: Vec<u64>,
    },

    /// Report per-worker utilization over the observed span
    WorkerEfficiency {
        /// Restrict the report to one worker name
        #[arg(long, value_name = "NAME")]
        worker: Option<String>,
    },

    /// Report a duration statistic per builder
    BuilderDurations(BuilderDurationsArgs),

    /// Delete all derived build metadata from the store
    TruncateBuildMetadata,

    /// Delete all derived log metadata from the store
    TruncateLogMetadata,
}

#[derive(Args, Debug)]
pub struct SelectionArgs {
    /// Exact builder category to select
    #[arg(long, value_name = "CATEGORY")]
    pub category: Option<String>,

    /// Case-insensitive shell glob matched against builder names
    #[arg(long, value_name = "GLOB")]
    pub pattern: Option<String>,
}

#[derive(Args, Debug)]
pub struct BuilderDurationsArgs {
    /// One of: count, mean, median, stddev, sum, variance, histogram
    #[arg(value_name = "STATISTIC")]
    pub statistic: Statistic,

    /// Report on a single builder by exact name
    #[arg(long, value_name = "NAME", conflicts_with_all = ["category", "pattern"])]
    pub builder: Option<String>,

    /// Exact builder category to select
    #[arg(long, value_name = "CATEGORY")]
    pub category: Option<String>,

    /// Case-insensitive shell glob matched against builder names
    #[arg(long, value_name = "GLOB")]
    pub pattern: Option<String>,
}
