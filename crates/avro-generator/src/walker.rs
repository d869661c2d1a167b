//! Schema walker.
//!
//! Walks the schema tree depth-first and builds the value tree, looking up
//! generators in the registry by path first and by type name second.
//!
//! Paths start empty at the root. A record field appends `.field`. A named
//! union branch selected by a rule under `<union path>.BranchName` appends
//! `.BranchName`; a branch picked at random keeps the union's path. Array
//! items share the array's path, and the item count comes from
//! `<path>.len()` when a rule defines it.

use crate::error::GeneratorError;
use crate::generators::FieldGenerator;
use crate::registry::{GeneratorRegistry, LEN_SUFFIX};
use rand::Rng;
use record_schema::{EnumSchema, RecordSchema, SchemaNode, Value};
use std::collections::BTreeMap;

/// Path of the top-level schema.
pub const ROOT_PATH: &str = "";

/// Exclusive upper bound of the default array length.
pub const DEFAULT_MAX_ARRAY_LEN: usize = 10;

pub struct SchemaWalker<'a, R> {
    registry: &'a GeneratorRegistry,
    rng: &'a mut R,
}

impl<'a, R: Rng> SchemaWalker<'a, R> {
    pub fn new(registry: &'a GeneratorRegistry, rng: &'a mut R) -> Self {
        Self { registry, rng }
    }

    /// Generate the value for `schema` found at `path`.
    pub fn walk(&mut self, schema: &SchemaNode, path: &str) -> Result<Value, GeneratorError> {
        match schema {
            SchemaNode::Record(record) => self.walk_record(record, path),
            SchemaNode::Array(items) => self.walk_array(items, path),
            SchemaNode::Union(branches) => match self.lookup(schema, path) {
                Some(generator) => generator.generate(&mut *self.rng),
                None => self.walk_union(branches, path),
            },
            SchemaNode::Enum(enum_schema) => match self.lookup(schema, path) {
                Some(generator) => generator.generate(&mut *self.rng),
                None => self.pick_symbol(enum_schema, path),
            },
            SchemaNode::Scalar(_) | SchemaNode::Null => match self.lookup(schema, path) {
                Some(generator) => generator.generate(&mut *self.rng),
                None => Err(GeneratorError::Unresolved {
                    type_name: schema.type_name(),
                    path: path.to_string(),
                }),
            },
        }
    }

    fn lookup(&self, schema: &SchemaNode, path: &str) -> Option<&'a FieldGenerator> {
        self.registry
            .resolve(path)
            .or_else(|| self.registry.resolve(schema.type_name()))
    }

    fn walk_record(&mut self, record: &RecordSchema, path: &str) -> Result<Value, GeneratorError> {
        let mut fields = BTreeMap::new();
        for field in &record.fields {
            let field_path = format!("{path}.{}", field.name);
            let value = self.walk(&field.schema, &field_path)?;
            fields.insert(field.name.clone(), value);
        }
        Ok(Value::Map(fields))
    }

    fn walk_array(&mut self, items: &SchemaNode, path: &str) -> Result<Value, GeneratorError> {
        let len_path = format!("{path}{LEN_SUFFIX}");
        let len = match self.registry.resolve(&len_path) {
            Some(generator) => {
                let value = generator.generate(&mut *self.rng)?;
                value
                    .as_i64()
                    .and_then(|n| usize::try_from(n).ok())
                    .ok_or_else(|| GeneratorError::InvalidLength {
                        path: len_path.clone(),
                        found: format!("{value:?}"),
                    })?
            }
            None => self.rng.random_range(0..DEFAULT_MAX_ARRAY_LEN),
        };

        // The length may come from a rule, so nothing is reserved up front
        let values = (0..len)
            .map(|_| self.walk(items, path))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::Array(values))
    }

    fn walk_union(&mut self, branches: &[SchemaNode], path: &str) -> Result<Value, GeneratorError> {
        if branches.is_empty() {
            return Err(GeneratorError::Unresolved {
                type_name: "union",
                path: path.to_string(),
            });
        }

        let hints = self.registry.branch_hints(path);
        let hinted = branches.iter().position(|branch| {
            branch
                .name()
                .is_some_and(|name| hints.iter().any(|hint| hint == name))
        });
        let (branch, branch_path) = match hinted {
            Some(index) => {
                let branch = &branches[index];
                let name = branch.name().unwrap_or_default();
                (branch, format!("{path}.{name}"))
            }
            None => {
                let index = self.rng.random_range(0..branches.len());
                (&branches[index], path.to_string())
            }
        };

        let value = self.walk(branch, &branch_path)?;
        Ok(match branch.name() {
            Some(name) => Value::wrap(name, value),
            None => value,
        })
    }

    fn pick_symbol(&mut self, enum_schema: &EnumSchema, path: &str) -> Result<Value, GeneratorError> {
        if enum_schema.symbols.is_empty() {
            return Err(GeneratorError::Unresolved {
                type_name: "enum",
                path: path.to_string(),
            });
        }
        let index = self.rng.random_range(0..enum_schema.symbols.len());
        Ok(Value::String(enum_schema.symbols[index].clone()))
    }
}
