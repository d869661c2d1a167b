//! Error types for the Kafka populator.

use thiserror::Error;

/// Errors that can occur while publishing generated records.
#[derive(Error, Debug)]
pub enum KafkaPopulatorError {
    #[error("Kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),

    #[error("Generator error: {0}")]
    Generator(#[from] avro_generator::GeneratorError),

    #[error("Security setting `{0}` not supported")]
    UnsupportedSecurity(String),

    #[error("SASL security requires a `sasl` section with username and password")]
    MissingSaslCredentials,
}

/// Result type for populate operations.
pub type Result<T> = std::result::Result<T, KafkaPopulatorError>;
