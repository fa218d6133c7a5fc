//! The validation engine: drives resolution, rule execution, and verdict
//! composition for one input object.

use crate::bag::ErrorBag;
use crate::error::RuleNotFoundError;
use crate::message::compose_message;
use crate::parse::{FieldRules, Rules, parse_rules};
use crate::registry::Registry;
use crate::resolve::resolve_path;
use serde_json::Value;
use std::collections::HashMap;

/// What a matched gate rule does to its field.
///
/// The reference behavior only fixes that a gate may skip the field's
/// remaining rules; whether it also suppresses failures already recorded
/// for that field is a policy choice, so it is configuration here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GatePolicy {
    /// Stop processing the field's remaining rules. Messages already
    /// recorded for the field stay.
    #[default]
    SkipRemaining,
    /// Stop processing and also discard messages already recorded for the
    /// concrete field during this run.
    SuppressField,
}

/// A single validation run: input object, parsed rules, and the verdict.
///
/// Construction is cheap and infallible (rule-spec parsing is total).
/// Validation happens once, on the first of [`evaluate`], [`passes`], or
/// [`fails`], and the whole outcome — including a fatal
/// [`RuleNotFoundError`] — is memoized: repeated queries in any order are
/// pure reads and never re-execute rule functions.
///
/// [`evaluate`]: Validator::evaluate
/// [`passes`]: Validator::passes
/// [`fails`]: Validator::fails
#[derive(Debug)]
pub struct Validator {
    registry: Registry,
    input: Value,
    field_rules: FieldRules,
    custom_messages: HashMap<String, String>,
    attribute_names: HashMap<String, String>,
    stop_on_first_failure: bool,
    gate_policy: GatePolicy,
    errors: ErrorBag,
    verdict: Option<Result<bool, RuleNotFoundError>>,
}

impl Validator {
    /// A run against the process-wide registry.
    pub fn new(input: Value, rules: &Rules) -> Self {
        Self::with_registry(Registry::global(), input, rules)
    }

    /// A run against an explicit registry (test isolation, or embedders
    /// that keep their own rule table).
    pub fn with_registry(registry: Registry, input: Value, rules: &Rules) -> Self {
        Self {
            registry,
            input,
            field_rules: parse_rules(rules),
            custom_messages: HashMap::new(),
            attribute_names: HashMap::new(),
            stop_on_first_failure: false,
            gate_policy: GatePolicy::default(),
            errors: ErrorBag::new(),
            verdict: None,
        }
    }

    /// Custom message templates. Keys are `"field.rule"` (declared field
    /// path) or a bare `"rule"`; the former wins.
    pub fn with_messages(mut self, messages: HashMap<String, String>) -> Self {
        self.custom_messages = messages;
        self
    }

    /// Display-name overrides for the `:attribute` token, keyed by declared
    /// or concrete field path.
    pub fn with_attribute_names(mut self, names: HashMap<String, String>) -> Self {
        self.attribute_names = names;
        self
    }

    /// Stop at a field's first failure instead of accumulating every
    /// failing rule for it.
    pub fn stop_on_first_failure(mut self, stop: bool) -> Self {
        self.stop_on_first_failure = stop;
        self
    }

    pub fn gate_policy(mut self, policy: GatePolicy) -> Self {
        self.gate_policy = policy;
        self
    }

    /// Run validation once and return whether every field passed.
    ///
    /// # Errors
    ///
    /// [`RuleNotFoundError`] if the rules bag references a rule name absent
    /// from the registry snapshot (including an empty name from a malformed
    /// spec). Fatal: the error bag is not authoritative after it.
    pub fn evaluate(&mut self) -> Result<bool, RuleNotFoundError> {
        if let Some(verdict) = &self.verdict {
            return verdict.clone();
        }
        let verdict = self.run();
        self.verdict = Some(verdict.clone());
        verdict
    }

    /// Whether validation passed. Evaluates on first call.
    pub fn passes(&mut self) -> Result<bool, RuleNotFoundError> {
        self.evaluate()
    }

    /// Whether validation failed. Evaluates on first call.
    pub fn fails(&mut self) -> Result<bool, RuleNotFoundError> {
        self.evaluate().map(|passed| !passed)
    }

    /// The accumulated failure messages.
    pub fn errors(&self) -> &ErrorBag {
        &self.errors
    }

    /// Consume the run, keeping only the failure messages.
    pub fn into_errors(self) -> ErrorBag {
        self.errors
    }

    fn run(&mut self) -> Result<bool, RuleNotFoundError> {
        // Snapshot every referenced definition up front, under one read
        // lock: the run stays internally consistent even if register() is
        // invoked concurrently, and an unknown name aborts before any rule
        // executes.
        let referenced = self
            .field_rules
            .iter()
            .flat_map(|(_, rules)| rules.iter().map(|rule| rule.name.as_str()));
        let snapshot = self.registry.snapshot(referenced)?;

        for (field, rules) in &self.field_rules {
            for (concrete, value) in resolve_path(&self.input, field) {
                'rules: for rule in rules {
                    // Snapshot is keyed by every referenced name; miss is
                    // unreachable after the check above.
                    let Some(definition) = snapshot.get(rule.name.as_str()) else {
                        continue;
                    };
                    let requirement = rule.requirement();
                    let matched =
                        definition.validate(value.as_ref(), &requirement, &concrete, &self.input);

                    if definition.is_gate() {
                        if matched {
                            if self.gate_policy == GatePolicy::SuppressField {
                                self.errors.remove(&concrete);
                            }
                            break 'rules;
                        }
                        continue;
                    }

                    if !matched {
                        let attribute = self
                            .attribute_names
                            .get(field)
                            .or_else(|| self.attribute_names.get(&concrete))
                            .map(String::as_str)
                            .unwrap_or(&concrete);
                        let message = compose_message(
                            definition,
                            &self.custom_messages,
                            field,
                            attribute,
                            &requirement,
                        );
                        self.errors.add(concrete.clone(), message);
                        if self.stop_on_first_failure {
                            break 'rules;
                        }
                    }
                }
            }
        }

        Ok(self.errors.is_empty())
    }
}
