//! Field generators.
//!
//! A [`FieldGenerator`] is either a compiled pattern or the constant null
//! generator. Generators are shared between registry keys, so the pattern is
//! reference-counted rather than cloned.

pub mod primitives;

use crate::error::GeneratorError;
use crate::pattern::{CompiledPattern, PatternError};
use rand::Rng;
use record_schema::Value;
use std::sync::Arc;

/// Produces one value per invocation.
#[derive(Debug, Clone)]
pub enum FieldGenerator {
    /// Compiled template
    Pattern(Arc<CompiledPattern>),
    /// Always produces null
    Null,
}

impl FieldGenerator {
    /// Compile a template into a generator.
    pub fn from_template(template: &str) -> Result<Self, PatternError> {
        Ok(Self::Pattern(Arc::new(CompiledPattern::compile(template)?)))
    }

    /// Produce the next value.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Result<Value, GeneratorError> {
        match self {
            FieldGenerator::Pattern(pattern) => pattern.generate(rng),
            FieldGenerator::Null => Ok(Value::Null),
        }
    }
}
