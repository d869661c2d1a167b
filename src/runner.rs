//! Producer orchestration.
//!
//! Every configured producer gets its own generator and runs as its own tokio
//! task; the Kafka client is shared. All generators are built before anything
//! is published, so a bad template or schema fails the run up front. The first
//! producer failure aborts the others.

use crate::config::{Configuration, ProducerConfiguration};
use anyhow::Context;
use avro_generator::AvroGenerator;
use avro_populate_kafka::{AvroPopulator, KafkaProducer, PopulateMetrics};
use schema_registry::{Credentials, SchemaRegistryClient};
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::info;

/// Seed derived from the current time, used when none is given.
pub fn default_seed() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default()
}

/// Fill `schema.raw` and `schema.id` of every producer that names a registry subject.
pub async fn resolve_registry_schemas(config: &mut Configuration) -> anyhow::Result<()> {
    let registry = &config.kafka.schema_registry;
    let needs_registry = config
        .producers
        .iter()
        .any(|p| p.avro.schema_name.as_deref().is_some_and(|s| !s.is_empty()));
    if !needs_registry || !registry.is_configured() {
        return Ok(());
    }

    let credentials = registry
        .credentials()
        .map(|(username, password)| Credentials { username, password });
    let client = SchemaRegistryClient::new(&registry.endpoint, credentials)
        .context("Unable to initialize the schema registry client")?;

    for producer in &mut config.producers {
        let Some(subject) = producer.avro.schema_name.clone() else {
            continue;
        };
        if subject.is_empty() {
            continue;
        }

        let schema = client.latest_schema(&subject).await.with_context(|| {
            format!(
                "Unable to retrieve the schema {subject} for the producer {}",
                producer.name
            )
        })?;
        producer.avro.schema.raw = schema.schema;
        producer.avro.schema.id = schema.id;
    }

    Ok(())
}

/// Build the generator of one producer.
pub fn build_generator(producer: &ProducerConfiguration, seed: u64) -> anyhow::Result<AvroGenerator> {
    AvroGenerator::new(&producer.avro, seed).with_context(|| {
        format!(
            "Unable to initialize the generator for the producer {}",
            producer.name
        )
    })
}

/// Build one populator per producer.
pub fn build_populators(
    config: &Configuration,
    seed: u64,
    batch_size: usize,
) -> anyhow::Result<Vec<AvroPopulator>> {
    config
        .producers
        .iter()
        .map(|producer| {
            let generator = build_generator(producer, seed)?;
            Ok(AvroPopulator::new(
                producer.name.clone(),
                producer.topic.clone(),
                producer.number_of_messages,
                generator,
            )
            .with_batch_size(batch_size))
        })
        .collect()
}

/// Run every producer to completion and return the combined metrics.
pub async fn run_producers(
    config: &Configuration,
    seed: u64,
    batch_size: usize,
) -> anyhow::Result<PopulateMetrics> {
    info!("Initializing the Avro generators with seed: {seed}");
    let populators = build_populators(config, seed, batch_size)?;

    let producer =
        KafkaProducer::new(&config.kafka).context("Unable to initialize the Kafka producer")?;

    let start = Instant::now();
    let mut tasks = JoinSet::new();
    for mut populator in populators {
        let producer = producer.clone();
        tasks.spawn(async move {
            let name = populator.name().to_string();
            populator
                .run(&producer)
                .await
                .with_context(|| format!("Producer {name} failed"))
        });
    }

    let mut total = PopulateMetrics::default();
    while let Some(joined) = tasks.join_next().await {
        let result = joined.context("Producer task did not complete");
        match result.and_then(|metrics| metrics) {
            Ok(metrics) => total.merge(&metrics),
            Err(e) => {
                tasks.abort_all();
                return Err(e);
            }
        }
    }

    total.total_duration = start.elapsed();
    info!("All records have been produced successfully");
    info!(
        "Produced {} records in {:?} ({:.2} msg/sec)",
        total.messages_published,
        total.total_duration,
        total.messages_per_second()
    );

    Ok(total)
}
