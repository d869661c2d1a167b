//! Generator registry.
//!
//! Maps lookup keys to generators. A key is one of:
//! - a field path such as `.testField.Nested.testNestedField`
//! - an array length path such as `.items.len()`
//! - a primitive type name (`int`, `string`, `null`, ...)
//! - `key` for the message key
//!
//! The registry starts from the default pool and then applies the rules, so a
//! rule on a type name replaces the default for that type.

use crate::error::GeneratorError;
use crate::generators::primitives::{default_generators, default_key_generator, KEY_RULE};
use crate::generators::FieldGenerator;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Suffix appended to an array path to look up its length generator.
pub const LEN_SUFFIX: &str = ".len()";

#[derive(Debug, Clone)]
pub struct GeneratorRegistry {
    entries: HashMap<String, FieldGenerator>,
    key: FieldGenerator,
    /// Path prefix -> path segments that follow it in some rule key
    branch_hints: HashMap<String, Vec<String>>,
}

impl GeneratorRegistry {
    /// Build the registry from named templates and rules.
    ///
    /// Every template is compiled up front, including ones no rule uses.
    pub fn build(
        generators: &BTreeMap<String, String>,
        rules: &BTreeMap<String, String>,
    ) -> Result<Self, GeneratorError> {
        let mut named = HashMap::with_capacity(generators.len());
        for (name, template) in generators {
            let generator = FieldGenerator::from_template(template).map_err(|source| {
                GeneratorError::Pattern {
                    name: name.clone(),
                    source,
                }
            })?;
            named.insert(name.as_str(), generator);
        }

        let mut registry = Self {
            entries: default_generators()?
                .into_iter()
                .map(|(name, generator)| (name.to_string(), generator))
                .collect(),
            key: default_key_generator()?,
            branch_hints: HashMap::new(),
        };

        for (rule, generator_name) in rules {
            let generator = named.get(generator_name.as_str()).ok_or_else(|| {
                GeneratorError::MissingGenerator {
                    generator: generator_name.clone(),
                    rule: rule.clone(),
                }
            })?;
            registry.insert(rule, generator.clone());
        }

        debug!(
            "Built generator registry: {} named generators, {} rules",
            named.len(),
            rules.len()
        );

        Ok(registry)
    }

    fn insert(&mut self, key: &str, generator: FieldGenerator) {
        if key == KEY_RULE {
            self.key = generator.clone();
        }
        self.record_branch_hints(key);
        self.entries.insert(key.to_string(), generator);
    }

    /// Record, for every proper prefix of a path key, the segment that follows it.
    fn record_branch_hints(&mut self, key: &str) {
        if !key.starts_with('.') {
            return;
        }
        for (dot, _) in key.match_indices('.') {
            let prefix = &key[..dot];
            let Some(next) = key[dot + 1..].split('.').next() else {
                continue;
            };
            if next.is_empty() {
                continue;
            }
            let hints = self.branch_hints.entry(prefix.to_string()).or_default();
            if !hints.iter().any(|hint| hint == next) {
                hints.push(next.to_string());
            }
        }
    }

    /// Look up a generator by path, type name or `key`.
    pub fn resolve(&self, key: &str) -> Option<&FieldGenerator> {
        self.entries.get(key)
    }

    /// Generator used for message keys.
    pub fn key_generator(&self) -> &FieldGenerator {
        &self.key
    }

    /// Segments that some rule key places directly after `path`.
    ///
    /// At a union, a branch whose name is among these is the one a rule targets.
    pub fn branch_hints(&self, path: &str) -> &[String] {
        self.branch_hints
            .get(path)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Registry with exactly the given entries and no defaults.
    #[cfg(test)]
    pub(crate) fn with_entries(entries: Vec<(&str, FieldGenerator)>) -> Self {
        let mut registry = Self {
            entries: HashMap::new(),
            key: FieldGenerator::Null,
            branch_hints: HashMap::new(),
        };
        for (key, generator) in entries {
            registry.insert(key, generator);
        }
        registry
    }
}
