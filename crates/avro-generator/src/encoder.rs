//! Avro binary encoding of generated value trees.
//!
//! The value tree is converted into an `apache_avro` value guided by the
//! schema: records become ordered field lists, enum symbols carry their
//! index, and union values carry the index of the branch they belong to.
//! Integer and float values are promoted to wider numeric types when the
//! schema asks for one (int -> long -> float -> double).

use apache_avro::types::Value as AvroValue;
use apache_avro::Schema as AvroSchema;
use record_schema::{ScalarKind, SchemaNode, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Value at '{path}' does not match the schema: expected {expected}, found {found}")]
    Mismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Missing field '{path}'")]
    MissingField { path: String },

    #[error("Symbol '{symbol}' at '{path}' is not declared by enum {name}")]
    UnknownSymbol {
        path: String,
        symbol: String,
        name: String,
    },

    #[error("Value at '{path}' matches no branch of the union")]
    NoMatchingBranch { path: String },

    #[error("Avro encoding failed: {0}")]
    Avro(#[from] apache_avro::Error),
}

/// Encode `value` as an Avro binary datum (no container, no framing).
pub fn encode_datum(
    avro_schema: &AvroSchema,
    schema: &SchemaNode,
    value: &Value,
) -> Result<Vec<u8>, EncodeError> {
    let avro_value = to_avro_value(schema, value, "")?;
    Ok(apache_avro::to_avro_datum(avro_schema, avro_value)?)
}

/// Convert a value tree into the codec's value type.
pub fn to_avro_value(
    schema: &SchemaNode,
    value: &Value,
    path: &str,
) -> Result<AvroValue, EncodeError> {
    match (schema, value) {
        (SchemaNode::Null, Value::Null) => Ok(AvroValue::Null),
        (SchemaNode::Scalar(kind), _) => scalar_to_avro(*kind, value, path),
        (SchemaNode::Record(record), Value::Map(fields)) => {
            let mut out = Vec::with_capacity(record.fields.len());
            for field in &record.fields {
                let field_path = format!("{path}.{}", field.name);
                let field_value = fields
                    .get(&field.name)
                    .ok_or_else(|| EncodeError::MissingField {
                        path: field_path.clone(),
                    })?;
                out.push((
                    field.name.clone(),
                    to_avro_value(&field.schema, field_value, &field_path)?,
                ));
            }
            Ok(AvroValue::Record(out))
        }
        (SchemaNode::Array(items), Value::Array(values)) => values
            .iter()
            .map(|item| to_avro_value(items, item, path))
            .collect::<Result<Vec<_>, _>>()
            .map(AvroValue::Array),
        (SchemaNode::Enum(enum_schema), Value::String(symbol)) => {
            let index = enum_schema
                .symbols
                .iter()
                .position(|s| s == symbol)
                .ok_or_else(|| EncodeError::UnknownSymbol {
                    path: path.to_string(),
                    symbol: symbol.clone(),
                    name: enum_schema.fullname.clone(),
                })?;
            Ok(AvroValue::Enum(index as u32, symbol.clone()))
        }
        (SchemaNode::Union(branches), _) => union_to_avro(branches, value, path),
        _ => Err(EncodeError::Mismatch {
            path: path.to_string(),
            expected: schema.type_name(),
            found: value.kind_name(),
        }),
    }
}

fn union_to_avro(
    branches: &[SchemaNode],
    value: &Value,
    path: &str,
) -> Result<AvroValue, EncodeError> {
    // Named branches arrive wrapped as { "BranchName": value }.
    if let Value::Map(map) = value {
        if map.len() == 1 {
            if let Some((name, inner)) = map.iter().next() {
                if let Some(index) = branches
                    .iter()
                    .position(|branch| branch.name() == Some(name.as_str()))
                {
                    let branch_path = format!("{path}.{name}");
                    let inner = to_avro_value(&branches[index], inner, &branch_path)?;
                    return Ok(AvroValue::Union(index as u32, Box::new(inner)));
                }
            }
        }
    }

    // Exact kind first, then the first branch the value can be promoted into.
    for promote in [false, true] {
        if let Some(index) = branches
            .iter()
            .position(|branch| accepts(branch, value, promote))
        {
            let inner = to_avro_value(&branches[index], value, path)?;
            return Ok(AvroValue::Union(index as u32, Box::new(inner)));
        }
    }

    Err(EncodeError::NoMatchingBranch {
        path: path.to_string(),
    })
}

fn accepts(branch: &SchemaNode, value: &Value, promote: bool) -> bool {
    match (branch, value) {
        (SchemaNode::Null, Value::Null) => true,
        (SchemaNode::Scalar(kind), _) => scalar_accepts(*kind, value, promote),
        (SchemaNode::Enum(enum_schema), Value::String(symbol)) => {
            enum_schema.symbols.iter().any(|s| s == symbol)
        }
        (SchemaNode::Array(_), Value::Array(_)) => true,
        (SchemaNode::Record(record), Value::Map(fields)) => record
            .fields
            .iter()
            .all(|field| fields.contains_key(&field.name)),
        _ => false,
    }
}

fn scalar_accepts(kind: ScalarKind, value: &Value, promote: bool) -> bool {
    match (kind, value) {
        (ScalarKind::Boolean, Value::Boolean(_))
        | (ScalarKind::Int, Value::Int(_))
        | (ScalarKind::Long, Value::Long(_))
        | (ScalarKind::Float, Value::Float(_))
        | (ScalarKind::Double, Value::Double(_))
        | (ScalarKind::String, Value::String(_)) => true,
        (ScalarKind::Long, Value::Int(_))
        | (ScalarKind::Float, Value::Int(_) | Value::Long(_))
        | (ScalarKind::Double, Value::Int(_) | Value::Long(_) | Value::Float(_)) => promote,
        _ => false,
    }
}

fn scalar_to_avro(kind: ScalarKind, value: &Value, path: &str) -> Result<AvroValue, EncodeError> {
    let converted = match (kind, value) {
        (ScalarKind::Boolean, Value::Boolean(b)) => AvroValue::Boolean(*b),
        (ScalarKind::Int, Value::Int(n)) => AvroValue::Int(*n),
        (ScalarKind::Long, Value::Int(n)) => AvroValue::Long(i64::from(*n)),
        (ScalarKind::Long, Value::Long(n)) => AvroValue::Long(*n),
        (ScalarKind::Float, Value::Int(n)) => AvroValue::Float(*n as f32),
        (ScalarKind::Float, Value::Long(n)) => AvroValue::Float(*n as f32),
        (ScalarKind::Float, Value::Float(f)) => AvroValue::Float(*f),
        (ScalarKind::Double, Value::Int(n)) => AvroValue::Double(f64::from(*n)),
        (ScalarKind::Double, Value::Long(n)) => AvroValue::Double(*n as f64),
        (ScalarKind::Double, Value::Float(f)) => AvroValue::Double(f64::from(*f)),
        (ScalarKind::Double, Value::Double(f)) => AvroValue::Double(*f),
        (ScalarKind::String, Value::String(s)) => AvroValue::String(s.clone()),
        _ => {
            return Err(EncodeError::Mismatch {
                path: path.to_string(),
                expected: kind.type_name(),
                found: value.kind_name(),
            })
        }
    };
    Ok(converted)
}
