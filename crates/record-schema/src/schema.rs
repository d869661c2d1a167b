//! Record schema definitions.
//!
//! A schema parsed by `apache_avro` is converted into [`SchemaNode`], a closed
//! sum type over the node kinds the generator knows how to walk:
//!
//! - `Record` - named record with ordered fields
//! - `Array` - homogeneous sequence of items
//! - `Union` - ordered list of branch schemas
//! - `Enum` - named list of symbols
//! - `Scalar` - one of the six [`ScalarKind`]s
//! - `Null` - the `null` primitive
//!
//! References to named types are replaced by the referenced definition.
//! Logical types over `int`, `long` and `string` are read as that primitive;
//! `bytes`, `fixed`, `map` and the logical types built on them are rejected, as
//! are recursive records.

use crate::types::ScalarKind;
use apache_avro::schema::{
    EnumSchema as AvroEnumSchema, RecordSchema as AvroRecordSchema, ResolvedSchema, SchemaKind,
};
use apache_avro::Schema as AvroSchema;
use std::collections::{HashMap, HashSet};

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema parsing.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The schema text is not a valid Avro schema
    #[error("Failed to parse schema: {0}")]
    Avro(#[from] apache_avro::Error),

    /// A reference to a named type that is not defined
    #[error("Unknown type: {0}")]
    UnknownType(String),

    /// A valid schema type the generator cannot produce values for
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// A structurally incomplete definition
    #[error("Invalid {kind} definition: {message}")]
    InvalidDefinition { kind: &'static str, message: String },

    /// A named type referenced from inside its own definition
    #[error("Recursive type reference: {0}")]
    RecursiveType(String),
}

// ============================================================================
// Schema Tree
// ============================================================================

/// A node of the parsed schema tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    Record(RecordSchema),
    Array(Box<SchemaNode>),
    Union(Vec<SchemaNode>),
    Enum(EnumSchema),
    Scalar(ScalarKind),
    Null,
}

/// Record definition with its fields in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    /// Short name, used as the union wrapper key
    pub name: String,
    /// Namespace-qualified name
    pub fullname: String,
    /// Fields in declaration order
    pub fields: Vec<FieldSchema>,
}

/// A single record field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    pub name: String,
    pub schema: SchemaNode,
}

/// Enum definition.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumSchema {
    /// Short name, used as the union wrapper key
    pub name: String,
    /// Namespace-qualified name
    pub fullname: String,
    /// Symbols in declaration order (never empty)
    pub symbols: Vec<String>,
}

impl SchemaNode {
    /// Parse a schema from its JSON text.
    pub fn parse(raw: &str) -> Result<Self, SchemaError> {
        Self::from_avro(&AvroSchema::parse_str(raw)?)
    }

    /// Convert a schema already parsed by `apache_avro`.
    pub fn from_avro(schema: &AvroSchema) -> Result<Self, SchemaError> {
        SchemaConverter::new(schema)?.convert(schema)
    }

    /// Type name of this node, as used for type-wide registry keys.
    pub fn type_name(&self) -> &'static str {
        match self {
            SchemaNode::Record(_) => "record",
            SchemaNode::Array(_) => "array",
            SchemaNode::Union(_) => "union",
            SchemaNode::Enum(_) => "enum",
            SchemaNode::Scalar(kind) => kind.type_name(),
            SchemaNode::Null => "null",
        }
    }

    /// Declared short name of a named node (record or enum).
    pub fn name(&self) -> Option<&str> {
        match self {
            SchemaNode::Record(record) => Some(&record.name),
            SchemaNode::Enum(schema) => Some(&schema.name),
            _ => None,
        }
    }

    /// Get the record definition if this node is a record.
    pub fn as_record(&self) -> Option<&RecordSchema> {
        match self {
            SchemaNode::Record(record) => Some(record),
            _ => None,
        }
    }
}

impl RecordSchema {
    /// Get a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }
}

// ============================================================================
// Conversion
// ============================================================================

/// Builds a [`SchemaNode`] tree from a parsed Avro schema.
///
/// Named references are resolved through the schema's own name table. Each
/// named type is converted once and cloned at later references.
struct SchemaConverter<'s> {
    /// Named definitions keyed by full name
    names: HashMap<String, &'s AvroSchema>,
    /// Converted named definitions keyed by full name
    converted: HashMap<String, SchemaNode>,
    /// Full names of records whose fields are still being converted
    in_progress: HashSet<String>,
}

impl<'s> SchemaConverter<'s> {
    fn new(schema: &'s AvroSchema) -> Result<Self, SchemaError> {
        let resolved = ResolvedSchema::try_from(schema)?;
        let names = resolved
            .get_names()
            .iter()
            .map(|(name, schema)| (name.fullname(None), *schema))
            .collect();

        Ok(Self {
            names,
            converted: HashMap::new(),
            in_progress: HashSet::new(),
        })
    }

    fn convert(&mut self, schema: &'s AvroSchema) -> Result<SchemaNode, SchemaError> {
        match schema {
            AvroSchema::Null => Ok(SchemaNode::Null),
            AvroSchema::Boolean => Ok(SchemaNode::Scalar(ScalarKind::Boolean)),
            AvroSchema::Int | AvroSchema::Date | AvroSchema::TimeMillis => {
                Ok(SchemaNode::Scalar(ScalarKind::Int))
            }
            AvroSchema::Long
            | AvroSchema::TimeMicros
            | AvroSchema::TimestampMillis
            | AvroSchema::TimestampMicros
            | AvroSchema::LocalTimestampMillis
            | AvroSchema::LocalTimestampMicros => Ok(SchemaNode::Scalar(ScalarKind::Long)),
            AvroSchema::Float => Ok(SchemaNode::Scalar(ScalarKind::Float)),
            AvroSchema::Double => Ok(SchemaNode::Scalar(ScalarKind::Double)),
            AvroSchema::String | AvroSchema::Uuid => Ok(SchemaNode::Scalar(ScalarKind::String)),
            AvroSchema::Array(array) => Ok(SchemaNode::Array(Box::new(self.convert(&array.items)?))),
            AvroSchema::Union(union) => {
                if union.variants().is_empty() {
                    return Err(SchemaError::InvalidDefinition {
                        kind: "union",
                        message: "a union needs at least one branch".to_string(),
                    });
                }
                let branches = union
                    .variants()
                    .iter()
                    .map(|branch| self.convert(branch))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(SchemaNode::Union(branches))
            }
            AvroSchema::Record(record) => self.convert_record(record),
            AvroSchema::Enum(enum_schema) => self.convert_enum(enum_schema),
            AvroSchema::Ref { name } => self.convert_reference(&name.fullname(None)),
            unsupported => Err(SchemaError::UnsupportedType(
                format!("{:?}", SchemaKind::from(unsupported)).to_lowercase(),
            )),
        }
    }

    fn convert_record(&mut self, record: &'s AvroRecordSchema) -> Result<SchemaNode, SchemaError> {
        let fullname = record.name.fullname(None);

        self.in_progress.insert(fullname.clone());
        let mut fields = Vec::with_capacity(record.fields.len());
        for field in &record.fields {
            fields.push(FieldSchema {
                name: field.name.clone(),
                schema: self.convert(&field.schema)?,
            });
        }
        self.in_progress.remove(&fullname);

        let node = SchemaNode::Record(RecordSchema {
            name: short_name(&fullname),
            fullname: fullname.clone(),
            fields,
        });
        self.converted.insert(fullname, node.clone());
        Ok(node)
    }

    fn convert_enum(&mut self, enum_schema: &AvroEnumSchema) -> Result<SchemaNode, SchemaError> {
        let fullname = enum_schema.name.fullname(None);
        if enum_schema.symbols.is_empty() {
            return Err(SchemaError::InvalidDefinition {
                kind: "enum",
                message: format!("enum '{fullname}' declares no symbols"),
            });
        }

        let node = SchemaNode::Enum(EnumSchema {
            name: short_name(&fullname),
            fullname: fullname.clone(),
            symbols: enum_schema.symbols.clone(),
        });
        self.converted.insert(fullname, node.clone());
        Ok(node)
    }

    fn convert_reference(&mut self, fullname: &str) -> Result<SchemaNode, SchemaError> {
        if self.in_progress.contains(fullname) {
            return Err(SchemaError::RecursiveType(fullname.to_string()));
        }
        if let Some(node) = self.converted.get(fullname) {
            return Ok(node.clone());
        }
        let schema = self
            .names
            .get(fullname)
            .copied()
            .ok_or_else(|| SchemaError::UnknownType(fullname.to_string()))?;
        self.convert(schema)
    }
}

fn short_name(fullname: &str) -> String {
    fullname
        .rsplit_once('.')
        .map_or(fullname, |(_, short)| short)
        .to_string()
}
