//! CLI argument definitions for the produce command.

use clap::Args;
use std::path::PathBuf;

/// Arguments shared by every command that reads the configuration file.
#[derive(Args, Clone, Debug)]
pub struct ConfigArgs {
    /// Path to the YAML configuration file
    #[arg(long, short = 'c', env = "AVRO_LOADGEN_CONFIG")]
    pub config: PathBuf,

    /// Random seed for generation (defaults to the current time in milliseconds)
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments of the produce command.
#[derive(Args, Clone, Debug)]
pub struct ProduceArgs {
    #[command(flatten)]
    pub common: ConfigArgs,

    /// Number of records generated before their deliveries are awaited
    #[arg(long, default_value = "100")]
    pub batch_size: usize,
}
