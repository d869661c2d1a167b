//! Thin wrapper around the rdkafka future producer.

use crate::config::KafkaConfiguration;
use crate::error::KafkaPopulatorError;
use rdkafka::producer::{FutureProducer, FutureRecord};
use std::time::Duration;
use tracing::info;

/// How long `send` may wait for room in the local queue.
const QUEUE_TIMEOUT: Duration = Duration::from_secs(30);

/// Kafka producer shared by all populators of a run.
///
/// Cloning is cheap; clones share the underlying client.
#[derive(Clone)]
pub struct KafkaProducer {
    producer: FutureProducer,
}

impl KafkaProducer {
    /// Create a producer for the configured cluster.
    ///
    /// The connection is established lazily on the first delivery.
    pub fn new(config: &KafkaConfiguration) -> Result<Self, KafkaPopulatorError> {
        let producer: FutureProducer = config.client_config()?.create()?;

        info!(
            "Created Kafka producer for {} (security: {})",
            config.cluster_endpoint, config.security
        );

        Ok(Self { producer })
    }

    /// Publish one message and wait for its delivery report.
    pub async fn produce(
        &self,
        topic: &str,
        key: &str,
        payload: &[u8],
    ) -> Result<(), KafkaPopulatorError> {
        let record = FutureRecord::to(topic).key(key).payload(payload);
        self.producer
            .send(record, QUEUE_TIMEOUT)
            .await
            .map_err(|(err, _)| KafkaPopulatorError::Kafka(err))?;
        Ok(())
    }
}
