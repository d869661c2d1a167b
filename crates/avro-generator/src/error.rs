//! Error type for generator operations.

use crate::encoder::EncodeError;
use crate::pattern::PatternError;
use record_schema::{ScalarKind, SchemaError};

#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// The Avro codec rejected the schema text
    #[error("Invalid Avro schema: {0}")]
    InvalidSchema(String),

    /// The schema uses a construct the walker does not support
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A named template failed to compile
    #[error("Invalid pattern for generator '{name}': {source}")]
    Pattern { name: String, source: PatternError },

    /// A rule references a generator name that was never declared
    #[error("Missing generator {generator} for the rule {rule}")]
    MissingGenerator { generator: String, rule: String },

    /// No path or type entry for a scalar or null position
    #[error("No generator found for type {type_name}, path '{path}'")]
    Unresolved {
        type_name: &'static str,
        path: String,
    },

    /// Rendered text does not parse as the pattern's declared kind
    #[error("Unable to parse '{value}' as {kind}")]
    Parse { value: String, kind: ScalarKind },

    /// A `.len()` generator produced something other than a non-negative integer
    #[error("Array length generator '{path}' produced {found}, expected a non-negative int or long")]
    InvalidLength { path: String, found: String },

    /// Key generation failed
    #[error("Unable to generate the key: {0}")]
    Key(Box<GeneratorError>),

    /// The key generator produced a value with no text form
    #[error("Key generator produced a {0} value, expected a scalar")]
    InvalidKey(&'static str),

    /// The value tree could not be encoded
    #[error("Unable to encode the record: {0}")]
    Encode(#[from] EncodeError),
}
