//! End-to-end generation of flat records.

use avro_generator::framing::{unframe_payload, HEADER_LEN};
use avro_generator::{AvroGenerator, GeneratorConfig, GeneratorError};
use record_schema::Value;

const EXAMPLE: &str = r#"
{
    "type" : "record",
    "name" : "Example",
    "fields" : [
        { "name": "booleanField", "type": "boolean" },
        { "name": "intField", "type": "int" },
        { "name": "longField", "type": "long" },
        { "name": "floatField", "type": "float" },
        { "name": "doubleField", "type": "double" },
        { "name": "stringField", "type": "string" }
    ]
}
"#;

fn constant_config() -> GeneratorConfig {
    GeneratorConfig::new(EXAMPLE, 1)
        .with_generator("booleanGen", "{boolean}[false]{1}")
        .with_generator("intGen", "{int}[1321]{1}")
        .with_generator("longGen", "{long}[9876]{1}")
        .with_generator("floatGen", "{float}[12.12]{1}")
        .with_generator("doubleGen", "{double}[123.321]{1}")
        .with_generator("stringGen", "{string}[stringValue]{1}")
        .with_generator("keyGen", "{string}[fixed-key]{1}")
        .with_rule("boolean", "booleanGen")
        .with_rule("int", "intGen")
        .with_rule("long", "longGen")
        .with_rule("float", "floatGen")
        .with_rule("double", "doubleGen")
        .with_rule("string", "stringGen")
        .with_rule("key", "keyGen")
}

#[test]
fn test_default_generators_vary() {
    let mut generator = AvroGenerator::new(&GeneratorConfig::new(EXAMPLE, 1), 0).unwrap();

    let first = generator.generate().unwrap();
    let second = generator.generate().unwrap();

    assert_ne!(first.payload, second.payload, "generated 2 identical records");
    assert_ne!(first.key, second.key, "generated 2 identical keys");
}

#[test]
fn test_constant_generators_repeat() {
    let mut generator = AvroGenerator::new(&constant_config(), 0).unwrap();

    let first = generator.generate().unwrap();
    let second = generator.generate().unwrap();

    assert_eq!(first, second);
    assert_eq!(first.key, "fixed-key");
}

#[test]
fn test_constant_values() {
    let mut generator = AvroGenerator::new(&constant_config(), 0).unwrap();
    let value = generator.generate_value().unwrap();

    assert_eq!(value.get("booleanField"), Some(&Value::Boolean(false)));
    assert_eq!(value.get("intField"), Some(&Value::Int(1321)));
    assert_eq!(value.get("longField"), Some(&Value::Long(9876)));
    assert_eq!(value.get("floatField"), Some(&Value::Float(12.12)));
    assert_eq!(value.get("doubleField"), Some(&Value::Double(123.321)));
    assert_eq!(value.get("stringField"), Some(&Value::from("stringValue")));
}

#[test]
fn test_payload_round_trips_through_codec() {
    let mut generator = AvroGenerator::new(&constant_config(), 0).unwrap();
    let record = generator.generate().unwrap();

    let (schema_id, mut body) = unframe_payload(&record.payload).unwrap();
    assert_eq!(schema_id, 1);
    assert_eq!(record.payload.len() - body.len(), HEADER_LEN);

    let decoded = apache_avro::from_avro_datum(generator.avro_schema(), &mut body, None).unwrap();
    assert_eq!(
        decoded,
        apache_avro::types::Value::Record(vec![
            ("booleanField".to_string(), apache_avro::types::Value::Boolean(false)),
            ("intField".to_string(), apache_avro::types::Value::Int(1321)),
            ("longField".to_string(), apache_avro::types::Value::Long(9876)),
            ("floatField".to_string(), apache_avro::types::Value::Float(12.12)),
            ("doubleField".to_string(), apache_avro::types::Value::Double(123.321)),
            (
                "stringField".to_string(),
                apache_avro::types::Value::String("stringValue".to_string())
            ),
        ])
    );
}

#[test]
fn test_path_rule_beats_type_rule() {
    let config = constant_config()
        .with_generator("special", "{int}[7]{1}")
        .with_rule(".intField", "special");
    let mut generator = AvroGenerator::new(&config, 0).unwrap();

    let value = generator.generate_value().unwrap();
    assert_eq!(value.get("intField"), Some(&Value::Int(7)));
}

#[test]
fn test_schema_id_header() {
    let mut generator = AvroGenerator::new(&GeneratorConfig::new(EXAMPLE, 1321), 0).unwrap();
    let record = generator.generate().unwrap();

    assert_eq!(&record.payload[..HEADER_LEN], &[0x00, 0x00, 0x00, 0x05, 0x29]);
}

#[test]
fn test_missing_generator() {
    let config = GeneratorConfig::new(EXAMPLE, 1).with_rule(".intField", "nope");

    match AvroGenerator::new(&config, 0) {
        Err(GeneratorError::MissingGenerator { generator, rule }) => {
            assert_eq!(generator, "nope");
            assert_eq!(rule, ".intField");
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected a missing generator error"),
    }
}

#[test]
fn test_parse_error_surfaces_at_generation() {
    let config = GeneratorConfig::new(EXAMPLE, 1)
        .with_generator("letters", "{int}[a-z]{3}")
        .with_rule(".intField", "letters");
    let mut generator = AvroGenerator::new(&config, 0).unwrap();

    assert!(matches!(
        generator.generate(),
        Err(GeneratorError::Parse { .. })
    ));
}

#[test]
fn test_rule_with_wrong_kind_fails_encoding() {
    let config = GeneratorConfig::new(EXAMPLE, 1)
        .with_generator("text", "{string}[abc]{1}")
        .with_rule(".intField", "text");
    let mut generator = AvroGenerator::new(&config, 0).unwrap();

    assert!(matches!(
        generator.generate(),
        Err(GeneratorError::Encode(_))
    ));
}
