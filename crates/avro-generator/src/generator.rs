//! Record assembler: walks the schema, generates the message key, then
//! encodes and frames the record.

use crate::config::GeneratorConfig;
use crate::encoder::encode_datum;
use crate::error::GeneratorError;
use crate::framing::frame_payload;
use crate::registry::GeneratorRegistry;
use crate::walker::{SchemaWalker, ROOT_PATH};
use apache_avro::Schema as AvroSchema;
use rand::rngs::StdRng;
use rand::SeedableRng;
use record_schema::{SchemaNode, Value};
use tracing::debug;

/// One framed message and its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedRecord {
    /// `[0x00][schema id][Avro body]`
    pub payload: Vec<u8>,
    pub key: String,
}

/// Generator of framed Avro records for a single producer.
///
/// The seeded RNG lives inside the generator, so an instance is meant to be
/// driven by one task at a time. Spawn one generator per producer.
pub struct AvroGenerator {
    schema: SchemaNode,
    avro_schema: AvroSchema,
    schema_id: u32,
    registry: GeneratorRegistry,
    rng: StdRng,
}

impl AvroGenerator {
    /// Parse the schema, compile every template and seed the RNG.
    pub fn new(config: &GeneratorConfig, seed: u64) -> Result<Self, GeneratorError> {
        let avro_schema = AvroSchema::parse_str(&config.schema.raw)
            .map_err(|e| GeneratorError::InvalidSchema(e.to_string()))?;
        let schema = SchemaNode::from_avro(&avro_schema)?;
        let registry = GeneratorRegistry::build(&config.generators, &config.generation_rules)?;

        debug!(
            "Created Avro generator for {} schema (id {}), seed {}",
            schema.name().unwrap_or(schema.type_name()),
            config.schema.id,
            seed
        );

        Ok(Self {
            schema,
            avro_schema,
            schema_id: config.schema.id,
            registry,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Generate the value tree of the next record without encoding it.
    pub fn generate_value(&mut self) -> Result<Value, GeneratorError> {
        SchemaWalker::new(&self.registry, &mut self.rng).walk(&self.schema, ROOT_PATH)
    }

    /// Generate the next message key.
    pub fn generate_key(&mut self) -> Result<String, GeneratorError> {
        let value = self
            .registry
            .key_generator()
            .generate(&mut self.rng)
            .map_err(|e| GeneratorError::Key(Box::new(e)))?;
        value.to_text().ok_or_else(|| {
            GeneratorError::Key(Box::new(GeneratorError::InvalidKey(value.kind_name())))
        })
    }

    /// Generate the next record and its key, then encode and frame the record.
    pub fn generate(&mut self) -> Result<GeneratedRecord, GeneratorError> {
        self.generate_with_value().map(|(record, _)| record)
    }

    /// Like [`generate`](Self::generate), also returning the value tree that
    /// was encoded.
    pub fn generate_with_value(&mut self) -> Result<(GeneratedRecord, Value), GeneratorError> {
        let value = self.generate_value()?;
        let key = self.generate_key()?;
        let body = encode_datum(&self.avro_schema, &self.schema, &value)?;

        let record = GeneratedRecord {
            payload: frame_payload(self.schema_id, &body),
            key,
        };
        Ok((record, value))
    }

    /// Lazily generate `count` records.
    pub fn records(&mut self, count: u64) -> GeneratedRecords<'_> {
        GeneratedRecords {
            generator: self,
            remaining: count,
        }
    }

    pub fn schema(&self) -> &SchemaNode {
        &self.schema
    }

    pub fn schema_id(&self) -> u32 {
        self.schema_id
    }

    /// Schema as parsed by the Avro codec, for decoding payloads.
    pub fn avro_schema(&self) -> &AvroSchema {
        &self.avro_schema
    }
}

/// Iterator returned by [`AvroGenerator::records`].
pub struct GeneratedRecords<'a> {
    generator: &'a mut AvroGenerator,
    remaining: u64,
}

impl Iterator for GeneratedRecords<'_> {
    type Item = Result<GeneratedRecord, GeneratorError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;
        Some(self.generator.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GeneratedRecords<'_> {}
