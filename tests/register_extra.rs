//! Custom-rule registration scenarios: retrieval, replacers, and override
//! of built-in definitions.

use fieldcheck::{Registry, RuleDefinition, Rules, Validator};
use serde_json::{Value, json};
use std::collections::HashMap;

#[test]
fn registered_rule_is_retrievable() {
    fieldcheck::register(
        "telephone",
        |value: Option<&Value>, _req: &str, _attr: &str, _input: &Value| {
            value
                .and_then(Value::as_str)
                .is_some_and(|s| {
                    let parts: Vec<&str> = s.split('-').collect();
                    parts.len() == 3
                        && parts[0].len() == 3
                        && parts[1].len() == 3
                        && parts[2].len() == 4
                        && parts.iter().all(|p| p.chars().all(|c| c.is_ascii_digit()))
                })
        },
        "The :attribute is not a valid phone number.",
    );

    let definition = fieldcheck::get_rule("telephone").expect("telephone should be registered");
    assert_eq!(definition.name, "telephone");
    assert!(definition.validate(
        Some(&json!("213-454-9988")),
        "",
        "phone",
        &json!({"phone": "213-454-9988"}),
    ));
}

#[test]
fn custom_rule_passes_matching_input() {
    fieldcheck::register(
        "telephone_format",
        |value: Option<&Value>, _req: &str, _attr: &str, _input: &Value| {
            value.and_then(Value::as_str).is_some_and(|s| {
                s.len() == 12
                    && s.as_bytes()[3] == b'-'
                    && s.as_bytes()[7] == b'-'
                    && s.chars().filter(|c| c.is_ascii_digit()).count() == 10
            })
        },
        "The :attribute is not a valid phone number.",
    );

    let rules = Rules::new().field("phone", "telephone_format");
    let mut validator = Validator::new(json!({"phone": "213-454-9988"}), &rules);
    assert_eq!(validator.passes(), Ok(true));
}

#[test]
fn replacer_rule_passes_above_bound() {
    fieldcheck::register_with_replacer(
        "greater_than",
        |value: Option<&Value>, req: &str, _attr: &str, _input: &Value| {
            match (value.and_then(Value::as_f64), req.parse::<f64>()) {
                (Some(v), Ok(bound)) => v > bound,
                _ => false,
            }
        },
        |req| {
            let mut tokens = HashMap::new();
            tokens.insert("value".to_string(), req.to_string());
            tokens
        },
        "The :attribute field should be greater than :value.",
    );

    let rules = Rules::new().field("age", "greater_than:21");
    let mut validator = Validator::new(json!({"age": 22}), &rules);
    assert_eq!(validator.passes(), Ok(true));
    assert_eq!(validator.fails(), Ok(false));
}

#[test]
fn replacer_rule_fails_with_substituted_message() {
    let registry = Registry::new();
    registry.register(
        RuleDefinition::new("greater_than", |value, req, _attr, _input| {
            match (value.and_then(Value::as_f64), req.parse::<f64>()) {
                (Some(v), Ok(bound)) => v > bound,
                _ => false,
            }
        })
        .with_replacer(|req| {
            let mut tokens = HashMap::new();
            tokens.insert("value".to_string(), req.to_string());
            tokens
        })
        .with_message("The :attribute field should be greater than :value."),
    );

    let rules = Rules::new().field("age", "greater_than:21");
    let mut validator = Validator::with_registry(registry, json!({"age": 18}), &rules);
    assert_eq!(validator.fails(), Ok(true));
    assert_eq!(validator.passes(), Ok(false));
    assert_eq!(
        validator.errors().first("age"),
        Some("The age field should be greater than 21."),
    );
}

#[test]
fn rule_without_replacer_uses_raw_requirement_for_value_token() {
    let registry = Registry::new();
    registry.register(
        RuleDefinition::new("greater_than", |value, req, _attr, _input| {
            match (value.and_then(Value::as_f64), req.parse::<f64>()) {
                (Some(v), Ok(bound)) => v > bound,
                _ => false,
            }
        })
        .with_message("The :attribute field is not big enough."),
    );

    let rules = Rules::new().field("age", "greater_than:21");
    let mut validator = Validator::with_registry(registry, json!({"age": 18}), &rules);
    assert_eq!(validator.fails(), Ok(true));
    assert_eq!(validator.passes(), Ok(false));
    assert_eq!(
        validator.errors().first("age"),
        Some("The age field is not big enough."),
    );
}

#[test]
fn default_value_token_substitutes_requirement() {
    // No replacer installed: :value falls back to the raw requirement.
    let registry = Registry::new();
    registry.register(
        RuleDefinition::new("greater_than", |_value, _req, _attr, _input| false)
            .with_message("The :attribute must exceed :value."),
    );

    let rules = Rules::new().field("age", "greater_than:21");
    let mut validator = Validator::with_registry(registry, json!({"age": 18}), &rules);
    assert_eq!(validator.fails(), Ok(true));
    assert_eq!(
        validator.errors().first("age"),
        Some("The age must exceed 21."),
    );
}

#[test]
fn overriding_a_builtin_replaces_its_behavior() {
    let registry = Registry::new();
    registry.register(RuleDefinition::new("string", |_value, _req, _attr, _input| {
        true
    }));

    let rules = Rules::new().field("field", "string");
    let mut validator =
        Validator::with_registry(registry.clone(), json!({"field": ["not a string"]}), &rules);
    assert_eq!(validator.passes(), Ok(true));
    assert_eq!(validator.fails(), Ok(false));

    // Re-registering restores strict behavior for subsequent instances.
    registry.register(
        RuleDefinition::new("string", |value, _req, _attr, _input| {
            matches!(value, Some(Value::String(_)))
        })
        .with_message("The :attribute must be a string."),
    );
    let mut strict =
        Validator::with_registry(registry, json!({"field": ["not a string"]}), &rules);
    assert_eq!(strict.fails(), Ok(true));
}

#[test]
fn last_registration_wins() {
    let registry = Registry::empty();
    assert!(!registry.contains("flip"));
    registry.register(RuleDefinition::new("flip", |_v, _r, _a, _i| false));
    registry.register(RuleDefinition::new("flip", |_v, _r, _a, _i| true));
    assert!(registry.contains("flip"));

    let rules = Rules::new().field("field", "flip");
    let mut validator = Validator::with_registry(registry, json!({"field": 1}), &rules);
    assert_eq!(validator.passes(), Ok(true));
}
