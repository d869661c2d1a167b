//! Per-producer populate loop.
//!
//! An [`AvroPopulator`] owns one [`AvroGenerator`] and publishes a fixed
//! number of framed records to one topic. Records are generated in batches;
//! the deliveries of a batch are awaited together before the next batch is
//! generated. The first generation or delivery failure stops the loop.

use crate::error::Result;
use crate::producer::KafkaProducer;
use avro_generator::{AvroGenerator, GeneratedRecord};
use futures::future::try_join_all;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Default batch size for message publishing.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Metrics from a populate operation.
#[derive(Debug, Clone, Default)]
pub struct PopulateMetrics {
    /// Number of messages published.
    pub messages_published: u64,
    /// Total time taken.
    pub total_duration: Duration,
    /// Time spent generating and encoding records.
    pub generation_duration: Duration,
    /// Time spent waiting for deliveries.
    pub publish_duration: Duration,
    /// Number of batches executed.
    pub batch_count: u64,
}

impl PopulateMetrics {
    /// Calculate messages per second.
    pub fn messages_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.messages_published as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Fold another producer's metrics into this one.
    ///
    /// Durations are not summed: producers run concurrently, so the total is
    /// the longest of the two.
    pub fn merge(&mut self, other: &PopulateMetrics) {
        self.messages_published += other.messages_published;
        self.batch_count += other.batch_count;
        self.total_duration = self.total_duration.max(other.total_duration);
        self.generation_duration += other.generation_duration;
        self.publish_duration += other.publish_duration;
    }
}

pub struct AvroPopulator {
    name: String,
    topic: String,
    count: u64,
    generator: AvroGenerator,
    batch_size: usize,
}

impl AvroPopulator {
    /// Create a populator that publishes `count` records to `topic`.
    pub fn new(
        name: impl Into<String>,
        topic: impl Into<String>,
        count: u64,
        generator: AvroGenerator,
    ) -> Self {
        Self {
            name: name.into(),
            topic: topic.into(),
            count,
            generator,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Set the batch size for publish operations.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Generate and publish every record.
    pub async fn run(
        &mut self,
        producer: &KafkaProducer,
    ) -> Result<PopulateMetrics> {
        let start_time = Instant::now();
        let mut metrics = PopulateMetrics::default();

        info!(
            "Producer {} started: {} records to topic '{}' (batch size: {})",
            self.name, self.count, self.topic, self.batch_size
        );

        let mut remaining = self.count;
        let mut generation_time = Duration::ZERO;
        let mut publish_time = Duration::ZERO;

        while remaining > 0 {
            let batch_count = std::cmp::min(remaining, self.batch_size as u64);

            let gen_start = Instant::now();
            let records: Vec<GeneratedRecord> = self
                .generator
                .records(batch_count)
                .collect::<std::result::Result<_, _>>()?;
            generation_time += gen_start.elapsed();

            let publish_start = Instant::now();
            let published = self.publish_batch(producer, &records).await?;
            publish_time += publish_start.elapsed();

            metrics.messages_published += published;
            metrics.batch_count += 1;
            remaining -= batch_count;

            debug!(
                "Producer {}: batch {} complete, {} messages published, {} remaining",
                self.name, metrics.batch_count, published, remaining
            );
        }

        metrics.total_duration = start_time.elapsed();
        metrics.generation_duration = generation_time;
        metrics.publish_duration = publish_time;

        info!(
            "Producer {} completed: {} records in {:?} ({:.2} msg/sec)",
            self.name,
            metrics.messages_published,
            metrics.total_duration,
            metrics.messages_per_second()
        );

        Ok(metrics)
    }

    async fn publish_batch(
        &self,
        producer: &KafkaProducer,
        records: &[GeneratedRecord],
    ) -> Result<u64> {
        let deliveries = records
            .iter()
            .map(|record| producer.produce(&self.topic, &record.key, &record.payload));
        let delivered = try_join_all(deliveries).await?;
        Ok(delivered.len() as u64)
    }
}
