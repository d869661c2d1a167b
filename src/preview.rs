//! Offline preview of generated records.
//!
//! Runs a producer's generator without touching Kafka and returns the value
//! trees together with their keys, so templates and rules can be checked
//! before a real run.

use crate::config::ProducerConfiguration;
use crate::runner::build_generator;
use record_schema::Value;
use serde::Serialize;

/// One generated record as shown by the preview command.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewRecord {
    pub key: String,
    /// Length of the framed payload in bytes
    pub size: usize,
    pub value: Value,
}

/// Generate `count` records for `producer`.
///
/// Every record goes through the same encode and framing path as a real run,
/// so a value the codec would reject fails here too.
pub fn preview_records(
    producer: &ProducerConfiguration,
    seed: u64,
    count: u64,
) -> anyhow::Result<Vec<PreviewRecord>> {
    let mut generator = build_generator(producer, seed)?;

    (0..count)
        .map(|_| {
            let (record, value) = generator.generate_with_value()?;
            Ok(PreviewRecord {
                key: record.key,
                size: record.payload.len(),
                value,
            })
        })
        .collect()
}
