//! Per-producer generator configuration.
//!
//! Mirrors the `avro` block of a producer in the YAML configuration:
//!
//! ```yaml
//! schema:
//!   id: 1321
//!   raw: '{"type":"record",...}'
//! schemaName: orders-value
//! generators:
//!   intGen: "{int}[0-9]{3}"
//! generationRules:
//!   .quantity: intGen
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Schema text and the registry id written into every framed payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSource {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub raw: String,
}

/// Inputs of one [`AvroGenerator`](crate::AvroGenerator).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    #[serde(default)]
    pub schema: SchemaSource,

    /// Registry subject to fetch the schema from, when `schema.raw` is empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_name: Option<String>,

    /// Generator name -> template
    #[serde(default)]
    pub generators: BTreeMap<String, String>,

    /// Path, type name or `key` -> generator name
    #[serde(default)]
    pub generation_rules: BTreeMap<String, String>,
}

impl GeneratorConfig {
    /// Configuration for an inline schema.
    pub fn new(raw: impl Into<String>, schema_id: u32) -> Self {
        Self {
            schema: SchemaSource {
                id: schema_id,
                raw: raw.into(),
            },
            ..Default::default()
        }
    }

    /// Declare a named template.
    pub fn with_generator(mut self, name: impl Into<String>, template: impl Into<String>) -> Self {
        self.generators.insert(name.into(), template.into());
        self
    }

    /// Bind a path, type name or `key` to a named template.
    pub fn with_rule(mut self, key: impl Into<String>, generator: impl Into<String>) -> Self {
        self.generation_rules.insert(key.into(), generator.into());
        self
    }

    /// Whether the schema has to be fetched from a registry.
    pub fn needs_registry(&self) -> bool {
        self.schema.raw.trim().is_empty()
    }
}
