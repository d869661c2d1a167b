//! Command-line interface for avro-loadgen
//!
//! # Usage Examples
//!
//! ```bash
//! # Produce the records of every configured producer
//! avro-loadgen produce --config loadgen.yaml
//!
//! # Reproducible run with larger batches
//! avro-loadgen produce -c loadgen.yaml --seed 1234 --batch-size 500
//!
//! # Inspect generated values without a broker
//! avro-loadgen preview -c loadgen.yaml --producer orders --count 3
//! ```
//!
//! Set `RUST_LOG=info` to see progress.

use anyhow::Context;
use avro_loadgen::{
    default_seed, load_configuration, load_producer_configuration, preview_records,
    resolve_registry_schemas, run_producers,
};
use avro_populate_kafka::{ConfigArgs, ProduceArgs};
use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser)]
#[command(name = "avro-loadgen")]
#[command(about = "Generate random Avro records from a schema and produce them to Kafka")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate and publish the records of every producer
    Produce {
        #[command(flatten)]
        args: ProduceArgs,
    },

    /// Print generated records as JSON lines without publishing
    Preview {
        #[command(flatten)]
        common: ConfigArgs,

        /// Producer to preview (defaults to the first one)
        #[arg(long)]
        producer: Option<String>,

        /// Number of records to print
        #[arg(long, default_value = "5")]
        count: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Produce { args } => {
            let mut config = load_configuration(&args.common.config)
                .with_context(|| format!("Failed to load configuration from {:?}", args.common.config))?;
            resolve_registry_schemas(&mut config).await?;

            let seed = args.common.seed.unwrap_or_else(default_seed);
            info!(
                "Producing {} records with {} producer(s)",
                config.total_messages(),
                config.producers.len()
            );
            run_producers(&config, seed, args.batch_size).await?;
        }
        Commands::Preview {
            common,
            producer,
            count,
        } => {
            let mut config = load_producer_configuration(&common.config)
                .with_context(|| format!("Failed to load configuration from {:?}", common.config))?;
            resolve_registry_schemas(&mut config).await?;

            let selected = match producer.as_deref() {
                Some(name) => config
                    .producer(name)
                    .with_context(|| format!("No producer named {name} in the configuration"))?,
                None => config
                    .producers
                    .first()
                    .context("At least one producer must be specified")?,
            };

            let seed = common.seed.unwrap_or_else(default_seed);
            info!("Previewing producer {} with seed: {seed}", selected.name);
            for record in preview_records(selected, seed, count)? {
                println!("{}", serde_json::to_string(&record)?);
            }
        }
    }

    Ok(())
}
