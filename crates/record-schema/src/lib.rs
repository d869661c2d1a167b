//! Core types for the avro-loadgen record generator.
//!
//! This crate provides the foundational types shared by the generator and
//! its collaborators:
//!
//! - [`ScalarKind`] - The six scalar kinds a pattern can produce
//! - [`SchemaNode`] - The parsed record schema tree
//! - [`Value`] - The value tree produced for one record
//!
//! # Architecture
//!
//! ```text
//! record-schema (this crate)
//!    │
//!    ├─── avro-generator       (walks SchemaNode, produces Value)
//!    │
//!    └─── avro-populate-kafka  (publishes encoded records)
//! ```
//!
//! # Example
//!
//! ```rust
//! use record_schema::{ScalarKind, SchemaNode};
//!
//! let schema = SchemaNode::parse(r#"
//! {
//!   "type": "record",
//!   "name": "Example",
//!   "fields": [ { "name": "count", "type": "int" } ]
//! }
//! "#).unwrap();
//!
//! let record = schema.as_record().unwrap();
//! assert_eq!(record.fields[0].schema, SchemaNode::Scalar(ScalarKind::Int));
//! ```

pub mod schema;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use schema::{EnumSchema, FieldSchema, RecordSchema, SchemaError, SchemaNode};
pub use types::ScalarKind;
pub use values::Value;
