//! Default generator pool.
//!
//! One generator per primitive type name plus the message key generator.
//! Registry rules override these entries.

use super::FieldGenerator;
use crate::error::GeneratorError;
use record_schema::ScalarKind;

/// Registry key of the message key generator.
pub const KEY_RULE: &str = "key";

/// Registry key of the null generator.
pub const NULL_TYPE: &str = "null";

pub const KEY_TEMPLATE: &str = "{string}[uuid()]{1}";
pub const BOOLEAN_TEMPLATE: &str = "{boolean}[true|false]{1}";
pub const INT_TEMPLATE: &str = "{int}[0-9]{4}";
pub const LONG_TEMPLATE: &str = "{long}[0-9]{7}";
pub const FLOAT_TEMPLATE: &str = "{float}[0]{1}[.]{1}[0-9]{3}";
pub const DOUBLE_TEMPLATE: &str = "{double}[0]{1}[.]{1}[0-9]{3}";
pub const STRING_TEMPLATE: &str = "{string}[a-Z|0-9]{10}";

/// Default template for a scalar kind.
pub fn default_template(kind: ScalarKind) -> &'static str {
    match kind {
        ScalarKind::Boolean => BOOLEAN_TEMPLATE,
        ScalarKind::Int => INT_TEMPLATE,
        ScalarKind::Long => LONG_TEMPLATE,
        ScalarKind::Float => FLOAT_TEMPLATE,
        ScalarKind::Double => DOUBLE_TEMPLATE,
        ScalarKind::String => STRING_TEMPLATE,
    }
}

/// Compile the default key generator.
pub fn default_key_generator() -> Result<FieldGenerator, GeneratorError> {
    compile_default(KEY_RULE, KEY_TEMPLATE)
}

/// Compile the per-type defaults, keyed by type name.
pub fn default_generators() -> Result<Vec<(&'static str, FieldGenerator)>, GeneratorError> {
    let mut generators = Vec::with_capacity(ScalarKind::ALL.len() + 1);
    for kind in ScalarKind::ALL {
        let name = kind.type_name();
        generators.push((name, compile_default(name, default_template(kind))?));
    }
    generators.push((NULL_TYPE, FieldGenerator::Null));
    Ok(generators)
}

fn compile_default(name: &str, template: &str) -> Result<FieldGenerator, GeneratorError> {
    FieldGenerator::from_template(template).map_err(|source| GeneratorError::Pattern {
        name: name.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use record_schema::Value;

    #[test]
    fn test_defaults_cover_every_type() {
        let generators = default_generators().unwrap();
        let names: Vec<&str> = generators.iter().map(|(name, _)| *name).collect();

        assert_eq!(
            names,
            vec!["boolean", "int", "long", "float", "double", "string", "null"]
        );
    }

    #[test]
    fn test_defaults_produce_declared_kinds() {
        let mut rng = StdRng::seed_from_u64(5);

        for (name, generator) in default_generators().unwrap() {
            for _ in 0..50 {
                let value = generator.generate(&mut rng).unwrap();
                assert_eq!(value.kind_name(), name);
                match value {
                    Value::Int(n) => assert!((0..10_000).contains(&n)),
                    Value::Long(n) => assert!((0..10_000_000).contains(&n)),
                    Value::Float(f) => assert!((0.0..1.0).contains(&f)),
                    Value::Double(f) => assert!((0.0..1.0).contains(&f)),
                    Value::String(s) => {
                        assert_eq!(s.len(), 10);
                        assert!(s.bytes().all(|b| b.is_ascii_alphanumeric()));
                    }
                    _ => {}
                }
            }
        }
    }

    #[test]
    fn test_default_key_is_uuid() {
        let mut rng = StdRng::seed_from_u64(5);
        let key = default_key_generator().unwrap().generate(&mut rng).unwrap();

        assert!(uuid::Uuid::parse_str(key.as_str().unwrap()).is_ok());
    }
}
