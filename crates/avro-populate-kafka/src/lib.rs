//! Kafka publisher for generated Avro records.
//!
//! Each configured producer gets an [`AvroPopulator`] that drives its own
//! [`avro_generator::AvroGenerator`] and publishes the framed payloads with
//! the generated keys through a shared [`KafkaProducer`].
//!
//! # Architecture
//!
//! ```text
//! KafkaConfiguration ──▶ ClientConfig ──▶ KafkaProducer (FutureProducer)
//!                                               ▲
//! AvroGenerator ──▶ AvroPopulator ──────────────┘
//!                     │  batches of GeneratedRecord { payload, key }
//!                     ▼
//!               PopulateMetrics
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use avro_generator::{AvroGenerator, GeneratorConfig};
//! use avro_populate_kafka::{AvroPopulator, KafkaConfiguration, KafkaProducer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let kafka = KafkaConfiguration {
//!         cluster_endpoint: "localhost:9092".to_string(),
//!         ..Default::default()
//!     };
//!     let producer = KafkaProducer::new(&kafka)?;
//!
//!     let generator = AvroGenerator::new(&GeneratorConfig::new(SCHEMA, 1), 42)?;
//!     let metrics = AvroPopulator::new("orders", "orders", 1000, generator)
//!         .run(&producer)
//!         .await?;
//!     println!("Published {} messages", metrics.messages_published);
//!     Ok(())
//! }
//! ```

pub mod args;
pub mod config;
pub mod error;
pub mod populator;
pub mod producer;

// Re-exports for convenience
pub use args::{ConfigArgs, ProduceArgs};
pub use config::{KafkaConfiguration, SaslConfiguration, SchemaRegistryConfiguration, Security};
pub use error::KafkaPopulatorError;
pub use populator::{AvroPopulator, PopulateMetrics, DEFAULT_BATCH_SIZE};
pub use producer::KafkaProducer;
