//! Rule-spec parsing: rules bag → per-field ordered rule lists.
//!
//! Parsing is pure and total: it never consults the registry and never
//! fails. Unknown or empty rule names are carried through and surface at
//! execution time instead, where referencing an unregistered rule is fatal.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One parsed rule: a name plus its ordered parameters.
///
/// Parameters come from splitting the text after the first `:` on `,`.
/// `"between:18,65"` parses to name `between`, parameters `["18", "65"]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRule {
    pub name: String,
    pub parameters: Vec<String>,
}

impl ParsedRule {
    /// The requirement string handed to check functions and replacers:
    /// the parameters re-joined with `,`. For single-parameter rules this
    /// is the raw text after the first `:`, commas included.
    pub fn requirement(&self) -> String {
        self.parameters.join(",")
    }
}

/// Per-field rule lists in declaration order.
pub(crate) type FieldRules = Vec<(String, Vec<ParsedRule>)>;

#[derive(Clone, Debug, PartialEq, Eq)]
enum RawSpec {
    /// A `"|"`-joined rule string, split at parse time.
    Joined(String),
    /// Already-split rule strings, one rule per element. This form bypasses
    /// the `|` splitting and is the escape hatch for rule strings that need
    /// a literal `|`-free grammar workaround.
    List(Vec<String>),
}

/// A rules bag: ordered `field path → rule spec` pairs.
///
/// Field paths may contain dotted segments and `*` wildcards
/// (`"items.*.price"`). A spec is either a `"|"`-joined string or a list of
/// individual rule strings. The bag deserializes directly from the JSON
/// object shape:
///
/// ```rust
/// use fieldcheck::Rules;
/// use serde_json::json;
///
/// let rules: Rules = serde_json::from_value(json!({
///     "email": "required|email",
///     "tags": ["array", "max:10"],
/// })).unwrap();
/// assert_eq!(rules.len(), 2);
/// ```
///
/// The rule-string grammar has no escape mechanism for literal `|`, `:`, or
/// `,` inside a parameter. The list form avoids `|` splitting; the
/// first-`:` split keeps later colons in the requirement; and because the
/// requirement string re-joins parameters with `,`, single-parameter rules
/// such as `regex` see commas intact.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Rules {
    fields: Vec<(String, RawSpec)>,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field with a `"|"`-joined rule spec.
    pub fn field(mut self, path: impl Into<String>, spec: impl Into<String>) -> Self {
        self.fields.push((path.into(), RawSpec::Joined(spec.into())));
        self
    }

    /// Append a field with already-split rule strings (one rule each).
    pub fn field_list<I, S>(mut self, path: impl Into<String>, specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = specs.into_iter().map(Into::into).collect();
        self.fields.push((path.into(), RawSpec::List(list)));
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'de> Deserialize<'de> for Rules {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = serde_json::Map::<String, Value>::deserialize(deserializer)?;
        let mut fields = Vec::with_capacity(map.len());
        for (path, spec) in map {
            let raw = match spec {
                Value::String(s) => RawSpec::Joined(s),
                Value::Array(items) => {
                    let mut list = Vec::with_capacity(items.len());
                    for item in items {
                        match item {
                            Value::String(s) => list.push(s),
                            other => {
                                return Err(de::Error::custom(format!(
                                    "rule list for '{}' must contain strings, got {}",
                                    path, other
                                )));
                            }
                        }
                    }
                    RawSpec::List(list)
                }
                other => {
                    return Err(de::Error::custom(format!(
                        "rules for '{}' must be a string or a list of strings, got {}",
                        path, other
                    )));
                }
            };
            fields.push((path, raw));
        }
        Ok(Rules { fields })
    }
}

/// Parse a single rule string (`"min:3"`, `"between:18,65"`, `"required"`).
///
/// Splits on the first `:` into name and parameter text, then splits the
/// parameter text on `,`. Every fragment is trimmed of leading/trailing
/// whitespace only.
pub fn parse_rule(piece: &str) -> ParsedRule {
    match piece.split_once(':') {
        Some((name, params)) => ParsedRule {
            name: name.trim().to_string(),
            parameters: params.split(',').map(|p| p.trim().to_string()).collect(),
        },
        None => ParsedRule {
            name: piece.trim().to_string(),
            parameters: Vec::new(),
        },
    }
}

/// Parse a `"|"`-joined rule spec into an ordered rule list.
///
/// An empty or whitespace-only spec yields an empty list (trivially
/// passes). Inside a non-empty spec, an empty piece (`"required|"`) is kept
/// as an empty-named rule and becomes fatal at execution time.
pub fn parse_rule_spec(spec: &str) -> Vec<ParsedRule> {
    if spec.trim().is_empty() {
        return Vec::new();
    }
    spec.split('|').map(parse_rule).collect()
}

/// Parse a whole rules bag, preserving field declaration order.
pub(crate) fn parse_rules(rules: &Rules) -> FieldRules {
    rules
        .fields
        .iter()
        .map(|(path, raw)| {
            let parsed = match raw {
                RawSpec::Joined(spec) => parse_rule_spec(spec),
                RawSpec::List(list) => list.iter().map(|piece| parse_rule(piece)).collect(),
            };
            (path.clone(), parsed)
        })
        .collect()
}
