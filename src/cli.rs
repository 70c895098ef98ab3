use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Simulate one configuration and print a summary
    Run(Run),
    /// Sweep the drop-rate x param grid, emit data files and a pyxplot script
    Batch(Batch),
}

#[derive(Parser, Clone, Debug)]
pub struct Run {
    /// Probability threshold for a trial counting as dropped, in (0,1]
    #[arg(long, default_value_t = 0.5)]
    pub drop_rate: f64,

    /// EWMA smoothing constant in [0,1); higher responds slower to change
    #[arg(long, default_value_t = 0.8)]
    pub param: f64,

    /// Sent packets per window
    #[arg(long, default_value_t = 100)]
    pub window_size: usize,

    /// Total simulated trials
    #[arg(long, default_value_t = 10_000)]
    pub trials: usize,

    /// RNG seed for a reproducible run (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory the data files are written into
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Summary output format
    #[arg(long, value_enum, default_value_t = SummaryFormat::Text)]
    pub format: SummaryFormat,
}

#[derive(Parser, Clone, Debug)]
pub struct Batch {
    /// Sent packets per window
    #[arg(long, default_value_t = 100)]
    pub window_size: usize,

    /// Total simulated trials per configuration
    #[arg(long, default_value_t = 10_000)]
    pub trials: usize,

    /// RNG seed for a reproducible sweep (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory data files and the plot script are written into
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Write data and script files but do not invoke pyxplot
    #[arg(long)]
    pub skip_plot: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum SummaryFormat {
    Text,
    Json,
}
