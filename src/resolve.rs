//! Attribute resolution: dotted and wildcard paths over JSON-shaped input.
//!
//! Resolution never mutates the input. A `*` segment fans out over every
//! member of the container at that position; nested wildcards compose
//! depth-first, left to right.

use serde_json::{Map, Value};

/// The observed shape of a resolved value.
///
/// Shape classification is the single place container-ness is decided:
/// the resolver walks `Mapping`/`Sequence` variants, and [`value_size`]
/// derives cardinality per variant. A new container-like rule family only
/// needs a new arm here.
#[derive(Clone, Debug)]
pub enum Shape<'a> {
    Numeric(f64),
    Text(&'a str),
    Sequence(&'a [Value]),
    Mapping(&'a Map<String, Value>),
    Other,
}

pub fn classify(value: &Value) -> Shape<'_> {
    match value {
        Value::Number(n) => n.as_f64().map(Shape::Numeric).unwrap_or(Shape::Other),
        Value::String(s) => Shape::Text(s),
        Value::Array(items) => Shape::Sequence(items),
        Value::Object(map) => Shape::Mapping(map),
        Value::Null | Value::Bool(_) => Shape::Other,
    }
}

/// Size of a value under the shape-driven semantics shared by the
/// cardinality rule family: numeric value, character count, element count,
/// or key count. `None` for shapes with no size.
pub fn value_size(value: &Value) -> Option<f64> {
    match classify(value) {
        Shape::Numeric(n) => Some(n),
        Shape::Text(s) => Some(s.chars().count() as f64),
        Shape::Sequence(items) => Some(items.len() as f64),
        Shape::Mapping(map) => Some(map.len() as f64),
        Shape::Other => None,
    }
}

/// Resolve a path expression to `(concrete path, value)` pairs.
///
/// A path without wildcards yields exactly one pair; a missing value is
/// `(path, None)` — present-but-absent, and each rule decides whether that
/// fails. A wildcard path yields one pair per concrete expansion, in the
/// container's natural order: sequence indices ascending, mapping keys in
/// insertion order. A missing or scalar container at a wildcard position
/// yields no pairs for that branch, while a literal segment missing *after*
/// a wildcard has matched still yields `(concrete, None)` so per-member
/// requiredness can fail.
pub fn resolve_path(input: &Value, path: &str) -> Vec<(String, Option<Value>)> {
    let segments: Vec<&str> = path.split('.').collect();
    if !segments.contains(&"*") {
        return vec![(path.to_string(), resolve_literal(input, &segments))];
    }

    let mut out = Vec::new();
    let mut trail = Vec::with_capacity(segments.len());
    expand(input, &segments, &mut trail, false, &mut out);
    out
}

/// Walk literal segments only: mapping keys by name, sequence elements by
/// numeric index.
fn resolve_literal(input: &Value, segments: &[&str]) -> Option<Value> {
    let mut current = input;
    for segment in segments {
        current = step(current, segment)?;
    }
    Some(current.clone())
}

fn step<'a>(current: &'a Value, segment: &str) -> Option<&'a Value> {
    match classify(current) {
        Shape::Mapping(map) => map.get(segment),
        Shape::Sequence(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

fn expand(
    current: &Value,
    segments: &[&str],
    trail: &mut Vec<String>,
    past_wildcard: bool,
    out: &mut Vec<(String, Option<Value>)>,
) {
    let Some((segment, rest)) = segments.split_first() else {
        out.push((trail.join("."), Some(current.clone())));
        return;
    };

    if *segment == "*" {
        match classify(current) {
            Shape::Sequence(items) => {
                for (i, item) in items.iter().enumerate() {
                    trail.push(i.to_string());
                    expand(item, rest, trail, true, out);
                    trail.pop();
                }
            }
            Shape::Mapping(map) => {
                for (key, value) in map {
                    trail.push(key.clone());
                    expand(value, rest, trail, true, out);
                    trail.pop();
                }
            }
            // No container to fan out over: this branch matches nothing.
            _ => {}
        }
        return;
    }

    match step(current, segment) {
        Some(next) => {
            trail.push((*segment).to_string());
            expand(next, rest, trail, past_wildcard, out);
            trail.pop();
        }
        None if past_wildcard && !rest.contains(&"*") => {
            // The wildcard matched a member but the literal tail is missing
            // under it: report the concrete path as present-but-absent.
            let mut concrete = trail.clone();
            concrete.extend(segments.iter().map(|s| (*s).to_string()));
            out.push((concrete.join("."), None));
        }
        None => {}
    }
}
