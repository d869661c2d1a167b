//! Schema-driven random Avro record generator.
//!
//! Given an Avro schema and a set of generation rules, this crate produces an
//! endless stream of schema-valid records, each encoded in Avro binary and
//! framed for the Kafka schema-registry wire format.
//!
//! # Architecture
//!
//! ```text
//! GeneratorConfig (schema + generators + rules)
//!        │
//!        ▼
//! ┌──────────────────────┐
//! │   AvroGenerator      │
//! │                      │
//! │  - SchemaNode        │
//! │  - GeneratorRegistry │──▶ FieldGenerator (CompiledPattern | Null)
//! │  - rng (StdRng)      │
//! └──────────┬───────────┘
//!            │ SchemaWalker
//!            ▼
//!      Value tree ──▶ Avro binary ──▶ [0x00][id][body]
//! ```
//!
//! # Example
//!
//! ```rust
//! use avro_generator::{AvroGenerator, GeneratorConfig};
//!
//! let raw = r#"{
//!     "type": "record",
//!     "name": "Order",
//!     "fields": [
//!         {"name": "id", "type": "string"},
//!         {"name": "quantity", "type": "int"}
//!     ]
//! }"#;
//!
//! let config = GeneratorConfig::new(raw, 1321)
//!     .with_generator("qty", "{int}[1|2|3]{1}[0-9]{2}")
//!     .with_rule(".quantity", "qty");
//!
//! let mut generator = AvroGenerator::new(&config, 42).unwrap();
//! let record = generator.generate().unwrap();
//! assert_eq!(&record.payload[..5], &[0x00, 0x00, 0x00, 0x05, 0x29]);
//! ```
//!
//! # Templates
//!
//! `{kind}[options]{count}...` where options are `a-z`, `A-Z`, `0-9`, `a-Z`,
//! `uuid()`, `timestamp_ms()` or literal text. See [`pattern`].

pub mod config;
pub mod encoder;
pub mod error;
pub mod framing;
pub mod generator;
pub mod generators;
pub mod pattern;
pub mod registry;
pub mod walker;

// Re-exports for convenience
pub use config::{GeneratorConfig, SchemaSource};
pub use encoder::EncodeError;
pub use error::GeneratorError;
pub use framing::frame_payload;
pub use generator::{AvroGenerator, GeneratedRecord, GeneratedRecords};
pub use generators::FieldGenerator;
pub use pattern::{CompiledPattern, PatternError};
pub use registry::GeneratorRegistry;
