//! Unions, arrays and enums.

use avro_generator::{AvroGenerator, GeneratorConfig, GeneratorError};
use record_schema::Value;

fn build(config: &GeneratorConfig, seed: u64) -> AvroGenerator {
    AvroGenerator::new(config, seed).unwrap()
}

#[test]
fn test_nullable_fields_with_defaults() {
    let raw = r#"
    {
        "type" : "record",
        "name" : "Example",
        "fields" : [
            { "name": "booleanField", "type": ["null", "boolean"] },
            { "name": "intField", "type": ["null", "int"] },
            { "name": "longField", "type": ["null", "long"] },
            { "name": "floatField", "type": ["null", "float"] },
            { "name": "doubleField", "type": ["null", "double"] },
            { "name": "stringField", "type": ["null", "string"] },
            { "name": "enumField", "type": ["null", { "type": "enum", "name": "Suit", "symbols" : ["SPADES", "HEARTS", "DIAMONDS", "CLUBS"]}]}
        ]
    }"#;
    let mut generator = build(&GeneratorConfig::new(raw, 1), 321);

    for _ in 0..50 {
        generator.generate().unwrap();
    }

    let value = generator.generate_value().unwrap();
    match value.get("enumField") {
        Some(Value::Null) => {}
        Some(wrapped) => {
            let symbol = wrapped.get("Suit").and_then(Value::as_str).unwrap();
            assert!(["SPADES", "HEARTS", "DIAMONDS", "CLUBS"].contains(&symbol));
        }
        None => panic!("enumField missing"),
    }
}

#[test]
fn test_rule_inside_union_branch_selects_branch() {
    let raw = r#"
    {
        "type": "record",
        "name": "Example",
        "fields": [
            {
                "name": "testField",
                "type": [
                    "string",
                    {
                        "type": "record",
                        "name": "Nested",
                        "fields": [
                            { "name": "testNestedField", "type": ["int", "float"] }
                        ]
                    }
                ]
            }
        ]
    }"#;
    let config = GeneratorConfig::new(raw, 1)
        .with_generator("intGen", "{int}[45678923]{1}")
        .with_rule(".testField.Nested.testNestedField", "intGen");

    for seed in 0..10 {
        let mut generator = build(&config, seed);
        let value = generator.generate_value().unwrap();

        let nested = value
            .get("testField")
            .and_then(|v| v.get("Nested"))
            .and_then(|v| v.get("testNestedField"));
        assert_eq!(nested, Some(&Value::Int(45678923)));
        generator.generate().unwrap();
    }
}

#[test]
fn test_rule_inside_randomly_chosen_branch() {
    let raw = r#"
    {
        "type": "record",
        "name": "Example",
        "fields": [
            {
                "name": "f",
                "type": [
                    "null",
                    { "type": "record", "name": "Inner", "fields": [ { "name": "x", "type": "int" } ] }
                ]
            }
        ]
    }"#;
    let config = GeneratorConfig::new(raw, 1)
        .with_generator("seven", "{int}[7]{1}")
        .with_rule(".f.x", "seven");

    let mut records = 0;
    for seed in 0..40 {
        let mut generator = build(&config, seed);
        let value = generator.generate_value().unwrap();

        match value.get("f") {
            Some(Value::Null) => {}
            Some(wrapped) => {
                let x = wrapped.get("Inner").and_then(|inner| inner.get("x"));
                assert_eq!(x, Some(&Value::Int(7)));
                records += 1;
            }
            None => panic!("f missing"),
        }
        generator.generate().unwrap();
    }
    assert!(records > 0);
}

#[test]
fn test_nested_union_with_defaults() {
    let raw = r#"
    {
        "type": "record",
        "name": "Example",
        "fields": [
            {
                "name": "testField",
                "type": [
                    "boolean",
                    {
                        "type": "record",
                        "name": "Nested",
                        "fields": [
                            { "name": "testNestedField", "type": ["string", "null"] }
                        ]
                    }
                ]
            }
        ]
    }"#;
    let mut generator = build(&GeneratorConfig::new(raw, 1), 1);

    for _ in 0..50 {
        generator.generate().unwrap();
    }
}

#[test]
fn test_rule_at_union_path() {
    let raw = r#"
    {
        "type": "record",
        "name": "Example",
        "fields": [{ "name": "testField", "type": ["boolean", "null"] }]
    }"#;
    let config = GeneratorConfig::new(raw, 1)
        .with_generator("alwaysTrue", "{boolean}[true]{1}")
        .with_rule(".testField", "alwaysTrue");
    let mut generator = build(&config, 123);

    let value = generator.generate_value().unwrap();
    assert_eq!(value.get("testField"), Some(&Value::Boolean(true)));
    generator.generate().unwrap();
}

const STRING_ARRAY: &str = r#"
{
    "type": "record",
    "name": "Example",
    "fields": [
        {
            "name": "testField",
            "type": { "type": "array", "items" : "string", "default": [] }
        }
    ]
}"#;

#[test]
fn test_array_items_and_length_rules() {
    let config = GeneratorConfig::new(STRING_ARRAY, 3373)
        .with_generator("strGen", "{string}[test1]{1}")
        .with_generator("lenGen", "{int}[10]{1}")
        .with_rule(".testField", "strGen")
        .with_rule(".testField.len()", "lenGen");
    let mut generator = build(&config, 0);

    let value = generator.generate_value().unwrap();
    let items = value.get("testField").and_then(Value::as_array).unwrap();
    assert_eq!(items.len(), 10);
    assert!(items.iter().all(|item| item == &Value::from("test1")));
    generator.generate().unwrap();
}

#[test]
fn test_array_default_length() {
    let mut generator = build(&GeneratorConfig::new(STRING_ARRAY, 3373), 0);

    for _ in 0..50 {
        let value = generator.generate_value().unwrap();
        let items = value.get("testField").and_then(Value::as_array).unwrap();
        assert!(items.len() < 10);
    }
}

#[test]
fn test_empty_array_of_records() {
    let raw = r#"
    {
        "type": "record",
        "name": "Example",
        "fields": [
            {
                "name": "testField",
                "type": {
                    "type": "array",
                    "items" : {
                        "type" : "record",
                        "name" : "ArrayObj",
                        "fields" : [{ "name": "stringField", "type": "string" }]
                    }
                }
            }
        ]
    }"#;
    let config = GeneratorConfig::new(raw, 3373)
        .with_generator("lenGen", "{int}[0]{1}")
        .with_rule(".testField.len()", "lenGen");
    let mut generator = build(&config, 0);

    let value = generator.generate_value().unwrap();
    assert_eq!(
        value.get("testField").and_then(Value::as_array).map(<[Value]>::len),
        Some(0)
    );
    generator.generate().unwrap();
}

#[test]
fn test_array_length_must_be_integer() {
    let config = GeneratorConfig::new(STRING_ARRAY, 1)
        .with_generator("lenGen", "{string}[ten]{1}")
        .with_rule(".testField.len()", "lenGen");
    let mut generator = build(&config, 0);

    assert!(matches!(
        generator.generate(),
        Err(GeneratorError::InvalidLength { .. })
    ));
}

const SUIT: &str = r#"
{
    "type": "record",
    "name": "Card",
    "fields": [
        {
            "name": "suit",
            "type": { "type": "enum", "name": "Suit", "symbols": ["SPADES", "HEARTS", "DIAMONDS", "CLUBS"] }
        }
    ]
}"#;

#[test]
fn test_enum_rule_restricts_symbols() {
    let config = GeneratorConfig::new(SUIT, 1)
        .with_generator("redSuit", "{string}[HEARTS|DIAMONDS]{1}")
        .with_rule(".suit", "redSuit");
    let mut generator = build(&config, 5);

    for _ in 0..50 {
        let value = generator.generate_value().unwrap();
        let suit = value.get("suit").and_then(Value::as_str).unwrap();
        assert!(suit == "HEARTS" || suit == "DIAMONDS");
    }
    generator.generate().unwrap();
}

#[test]
fn test_enum_rule_with_unknown_symbol_fails_encoding() {
    let config = GeneratorConfig::new(SUIT, 1)
        .with_generator("joker", "{string}[JOKER]{1}")
        .with_rule(".suit", "joker");
    let mut generator = build(&config, 5);

    assert!(matches!(
        generator.generate(),
        Err(GeneratorError::Encode(_))
    ));
}
