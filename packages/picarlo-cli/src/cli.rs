use clap::{Args, Parser, Subcommand};
use picarlo_core::DEFAULT_BATCH_SIZE;

#[derive(Parser)]
#[command(
    name = "picarlo",
    version,
    about = "Monte Carlo pi estimation client",
    long_about = "Fetch random 2D samples from a picarlo point source and estimate pi\n\
                  from the fraction landing inside the unit quarter disk."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch samples and print the pi estimate, no animation
    Estimate(EstimateArgs),
    /// Rain the samples onto a terminal canvas batch by batch (Ctrl-C stops)
    Rain(RainArgs),
}

#[derive(Args)]
pub struct EstimateArgs {
    /// Number of sample points to request
    #[arg(short = 'n', long)]
    pub count: u64,

    /// Point source base URL
    #[arg(long, env = "PICARLO_URL", default_value = "http://localhost:3000")]
    pub url: String,

    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Compact JSON output (no indentation)
    #[arg(long, default_value_t = false)]
    pub compact: bool,
}

#[derive(Args)]
pub struct RainArgs {
    /// Number of sample points to request
    #[arg(short = 'n', long)]
    pub count: u64,

    /// Point source base URL
    #[arg(long, env = "PICARLO_URL", default_value = "http://localhost:3000")]
    pub url: String,

    /// Side length of the square canvas, in cells
    #[arg(long, default_value_t = 40)]
    pub size: u32,

    /// Scheduled ticks per second
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Maximum points drawn per tick
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch: usize,
}
