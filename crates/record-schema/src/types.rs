//! Scalar kinds supported by the generator.

use std::fmt;

/// Scalar kind of a schema leaf or of a pattern's result.
///
/// The textual names are the record-schema primitive type names, which are
/// also the registry keys for the per-type default generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// `boolean`
    Boolean,
    /// `int` (32-bit signed)
    Int,
    /// `long` (64-bit signed)
    Long,
    /// `float` (32-bit IEEE 754)
    Float,
    /// `double` (64-bit IEEE 754)
    Double,
    /// `string`
    String,
}

impl ScalarKind {
    /// All scalar kinds, in declaration order.
    pub const ALL: [ScalarKind; 6] = [
        ScalarKind::Boolean,
        ScalarKind::Int,
        ScalarKind::Long,
        ScalarKind::Float,
        ScalarKind::Double,
        ScalarKind::String,
    ];

    /// Look up a scalar kind by its schema type name.
    pub fn from_type_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.type_name() == name)
    }

    /// Schema type name of this kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            ScalarKind::Boolean => "boolean",
            ScalarKind::Int => "int",
            ScalarKind::Long => "long",
            ScalarKind::Float => "float",
            ScalarKind::Double => "double",
            ScalarKind::String => "string",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}
