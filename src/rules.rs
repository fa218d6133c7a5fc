//! The built-in rule catalog.
//!
//! Every rule here goes through [`Registry::register`], the same path
//! custom rules use, so each one can be overridden. Rules outside the
//! required/accepted family pass on absent and null values; pairing a field
//! with `required` is what makes it mandatory.

use crate::registry::{Registry, RuleDefinition};
use crate::resolve::value_size;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$").unwrap()
});

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(https?|ftp)://[^\s/$.?#].[^\s]*$").unwrap());

static ALPHA_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z]+$").unwrap());

static ALPHA_NUM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());

static ALPHA_DASH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap());

/// Seed a registry with the built-in catalog.
pub(crate) fn register_builtins(registry: &Registry) {
    // ─── Presence family (absent values fail) ───────────────────────────────
    registry.register(
        RuleDefinition::new("required", |value, _req, _attr, _input| match value {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(Value::Array(items)) => !items.is_empty(),
            Some(_) => true,
        })
        .with_message("The :attribute field is required."),
    );

    registry.register(
        RuleDefinition::new("present", |value, _req, _attr, _input| value.is_some())
            .with_message("The :attribute field must be present."),
    );

    registry.register(
        RuleDefinition::new("accepted", |value, _req, _attr, _input| match value {
            Some(Value::Bool(true)) => true,
            Some(Value::String(s)) => matches!(s.as_str(), "yes" | "on" | "1" | "true"),
            Some(Value::Number(n)) => n.as_i64() == Some(1),
            _ => false,
        })
        .with_message("The :attribute must be accepted."),
    );

    // ─── Gates ──────────────────────────────────────────────────────────────
    // For gates, `true` is a skip signal: stop processing the field's
    // remaining rules. They never record failures.
    registry.register(
        RuleDefinition::new("sometimes", |value, _req, _attr, _input| value.is_none()).gate(),
    );

    registry.register(
        RuleDefinition::new("nullable", |value, _req, _attr, _input| {
            matches!(value, Some(Value::Null))
        })
        .gate(),
    );

    // ─── Type family ────────────────────────────────────────────────────────
    registry.register(
        RuleDefinition::new("string", |value, _req, _attr, _input| {
            skippable(value, |v| matches!(v, Value::String(_)))
        })
        .with_message("The :attribute must be a string."),
    );

    registry.register(
        RuleDefinition::new("numeric", |value, _req, _attr, _input| {
            skippable(value, |v| as_number(v).is_some())
        })
        .with_message("The :attribute must be a number."),
    );

    registry.register(
        RuleDefinition::new("integer", |value, _req, _attr, _input| {
            skippable(value, |v| match v {
                Value::Number(n) => n.is_i64() || n.is_u64(),
                Value::String(s) => s.parse::<i64>().is_ok(),
                _ => false,
            })
        })
        .with_message("The :attribute must be an integer."),
    );

    registry.register(
        RuleDefinition::new("boolean", |value, _req, _attr, _input| {
            skippable(value, |v| match v {
                Value::Bool(_) => true,
                Value::String(s) => matches!(s.as_str(), "true" | "false" | "0" | "1"),
                Value::Number(n) => matches!(n.as_i64(), Some(0) | Some(1)),
                _ => false,
            })
        })
        .with_message("The :attribute must be a boolean."),
    );

    registry.register(
        RuleDefinition::new("array", |value, _req, _attr, _input| {
            skippable(value, |v| matches!(v, Value::Array(_)))
        })
        .with_message("The :attribute must be an array."),
    );

    registry.register(
        RuleDefinition::new("object", |value, _req, _attr, _input| {
            skippable(value, |v| matches!(v, Value::Object(_)))
        })
        .with_message("The :attribute must be an object."),
    );

    // ─── Cardinality family (shared size semantics via value_size) ──────────
    registry.register(
        RuleDefinition::new("min", |value, req, _attr, _input| {
            compare_size(value, req, |size, bound| size >= bound)
        })
        .with_replacer(|req| single_token("min", req))
        .with_message("The :attribute must be at least :min."),
    );

    registry.register(
        RuleDefinition::new("max", |value, req, _attr, _input| {
            compare_size(value, req, |size, bound| size <= bound)
        })
        .with_replacer(|req| single_token("max", req))
        .with_message("The :attribute may not be greater than :max."),
    );

    registry.register(
        RuleDefinition::new("size", |value, req, _attr, _input| {
            compare_size(value, req, |size, bound| size == bound)
        })
        .with_replacer(|req| single_token("size", req))
        .with_message("The :attribute must be :size."),
    );

    registry.register(
        RuleDefinition::new("between", |value, req, _attr, _input| {
            skippable(value, |v| {
                let Some((low, high)) = parse_bounds(req) else {
                    return false;
                };
                match value_size(v) {
                    Some(size) => size >= low && size <= high,
                    None => false,
                }
            })
        })
        .with_replacer(|req| {
            let mut parts = req.splitn(2, ',');
            let mut tokens = HashMap::new();
            tokens.insert(
                "min".to_string(),
                parts.next().unwrap_or("").trim().to_string(),
            );
            tokens.insert(
                "max".to_string(),
                parts.next().unwrap_or("").trim().to_string(),
            );
            tokens
        })
        .with_message("The :attribute must be between :min and :max."),
    );

    registry.register(
        RuleDefinition::new("digits", |value, req, _attr, _input| {
            skippable(value, |v| {
                let Ok(expected) = req.parse::<usize>() else {
                    return false;
                };
                let digits = match v {
                    Value::Number(n) if n.is_i64() || n.is_u64() => n.to_string(),
                    Value::String(s) if s.parse::<i64>().is_ok() => s.clone(),
                    _ => return false,
                };
                digits.trim_start_matches('-').chars().count() == expected
            })
        })
        .with_replacer(|req| single_token("digits", req))
        .with_message("The :attribute must be :digits digits."),
    );

    // ─── Membership family ──────────────────────────────────────────────────
    registry.register(
        RuleDefinition::new("in", |value, req, _attr, _input| {
            skippable(value, |v| in_list(v, req))
        })
        .with_replacer(|req| single_token("values", req))
        .with_message("The selected :attribute is invalid."),
    );

    registry.register(
        RuleDefinition::new("not_in", |value, req, _attr, _input| {
            skippable(value, |v| !in_list(v, req))
        })
        .with_replacer(|req| single_token("values", req))
        .with_message("The selected :attribute is invalid."),
    );

    // ─── Cross-field family (reads the full input object) ───────────────────
    registry.register(
        RuleDefinition::new("same", |value, req, _attr, input| {
            skippable(value, |v| {
                crate::resolve::resolve_path(input, req)
                    .first()
                    .and_then(|(_, other)| other.as_ref())
                    .is_some_and(|other| other == v)
            })
        })
        .with_replacer(|req| single_token("other", req))
        .with_message("The :attribute and :other fields must match."),
    );

    registry.register(
        RuleDefinition::new("different", |value, req, _attr, input| {
            skippable(value, |v| {
                crate::resolve::resolve_path(input, req)
                    .first()
                    .and_then(|(_, other)| other.as_ref())
                    .is_none_or(|other| other != v)
            })
        })
        .with_replacer(|req| single_token("other", req))
        .with_message("The :attribute and :other must be different."),
    );

    // ─── Format family ──────────────────────────────────────────────────────
    registry.register(
        RuleDefinition::new("regex", |value, req, _attr, _input| {
            skippable(value, |v| {
                let text = match v {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    _ => return false,
                };
                match Regex::new(req) {
                    Ok(re) => re.is_match(&text),
                    Err(_) => false,
                }
            })
        })
        .with_message("The :attribute format is invalid."),
    );

    register_pattern(registry, "email", &EMAIL_RE, "The :attribute format is invalid.");
    register_pattern(registry, "url", &URL_RE, "The :attribute format is invalid.");
    register_pattern(
        registry,
        "alpha",
        &ALPHA_RE,
        "The :attribute field must contain only alphabetic characters.",
    );
    register_pattern(
        registry,
        "alpha_num",
        &ALPHA_NUM_RE,
        "The :attribute field may only contain alpha-numeric characters.",
    );
    register_pattern(
        registry,
        "alpha_dash",
        &ALPHA_DASH_RE,
        "The :attribute field may only contain alpha-numeric characters, as well as dashes and underscores.",
    );
}

/// Absent and null values pass for rules outside the presence family.
fn skippable(value: Option<&Value>, check: impl Fn(&Value) -> bool) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(v) => check(v),
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn compare_size(value: Option<&Value>, req: &str, cmp: impl Fn(f64, f64) -> bool) -> bool {
    skippable(value, |v| {
        let Ok(bound) = req.trim().parse::<f64>() else {
            return false;
        };
        match value_size(v) {
            Some(size) => cmp(size, bound),
            None => false,
        }
    })
}

fn parse_bounds(req: &str) -> Option<(f64, f64)> {
    let (low, high) = req.split_once(',')?;
    Some((
        low.trim().parse::<f64>().ok()?,
        high.trim().parse::<f64>().ok()?,
    ))
}

fn in_list(value: &Value, req: &str) -> bool {
    let needle = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return false,
    };
    req.split(',').any(|candidate| candidate.trim() == needle)
}

fn single_token(token: &str, req: &str) -> HashMap<String, String> {
    let mut tokens = HashMap::new();
    tokens.insert(token.to_string(), req.to_string());
    tokens
}

fn register_pattern(registry: &Registry, name: &str, pattern: &'static LazyLock<Regex>, message: &str) {
    registry.register(
        RuleDefinition::new(name, move |value, _req, _attr, _input| {
            skippable(value, |v| match v {
                Value::String(s) => pattern.is_match(s),
                _ => false,
            })
        })
        .with_message(message),
    );
}
