//! Failure-message composition: template selection and `:token`
//! substitution.

use crate::registry::RuleDefinition;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r":(\w+)").unwrap());

/// Substitute every `:token` occurrence with its mapping entry.
///
/// Tokens are `:` followed by word characters, matched case-sensitively.
/// Unmatched tokens stay literal. Substitution is a single pass: replaced
/// text is never re-scanned.
pub fn substitute(template: &str, tokens: &HashMap<String, String>) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| match tokens.get(&caps[1]) {
            Some(replacement) => replacement.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Compose the final message for a failing rule.
///
/// Template precedence: a custom override keyed `"field.rule"` (declared
/// field path), then a bare `"rule"` override, then the rule's own
/// template. The token map starts with `attribute`, then merges the rule's
/// replacer output — or `{value: requirement}` when no replacer is
/// installed.
pub(crate) fn compose_message(
    definition: &RuleDefinition,
    custom_messages: &HashMap<String, String>,
    declared_field: &str,
    attribute: &str,
    requirement: &str,
) -> String {
    let field_key = format!("{}.{}", declared_field, definition.name);
    let template = custom_messages
        .get(&field_key)
        .or_else(|| custom_messages.get(&definition.name))
        .map(String::as_str)
        .unwrap_or(&definition.message);

    let mut tokens = HashMap::new();
    tokens.insert("attribute".to_string(), attribute.to_string());
    match definition.replacements(requirement) {
        Some(extra) => tokens.extend(extra),
        None => {
            tokens.insert("value".to_string(), requirement.to_string());
        }
    }

    substitute(template, &tokens)
}
