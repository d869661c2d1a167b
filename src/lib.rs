//! avro-loadgen library
//!
//! Produces schema-conformant random Avro records to Kafka for load testing.
//!
//! # Architecture
//!
//! ```text
//! config.yaml ──▶ Configuration ──▶ (schema registry lookup, optional)
//!                      │
//!                      ▼ per producer
//!               AvroGenerator ──▶ AvroPopulator ──▶ KafkaProducer ──▶ topic
//!                      │
//!                      └──▶ preview (JSON lines on stdout)
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! # Publish every configured producer
//! avro-loadgen produce --config loadgen.yaml --seed 42
//!
//! # Print five generated records of one producer without publishing
//! avro-loadgen preview --config loadgen.yaml --producer orders --count 5
//! ```

pub mod config;
pub mod preview;
pub mod runner;

pub use config::{
    load_configuration, load_producer_configuration, parse_configuration, ConfigError,
    Configuration, ProducerConfiguration,
};
pub use preview::{preview_records, PreviewRecord};
pub use runner::{build_populators, default_seed, resolve_registry_schemas, run_producers};
