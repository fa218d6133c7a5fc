//! The rule registry: named rule definitions and the process-wide table.
//!
//! Built-in rules are seeded through [`Registry::register`], the identical
//! code path custom rules use, so overriding a built-in (re-registering
//! `"string"`, say) is ordinary supported behavior. Last registration wins.

use crate::error::RuleNotFoundError;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

/// Signature of a rule's check function.
///
/// Arguments are the resolved value (`None` when the field is absent from
/// the input), the requirement string (the raw text after `:` in the rule
/// spec), the concrete attribute name, and the full input object.
pub type ValidateFn = Arc<dyn Fn(Option<&Value>, &str, &str, &Value) -> bool + Send + Sync>;

/// Signature of a rule's placeholder replacer.
///
/// Maps the requirement string to `token → replacement` entries merged into
/// the message placeholder map.
pub type ReplacerFn = Arc<dyn Fn(&str) -> HashMap<String, String> + Send + Sync>;

/// Fallback template for rules registered without a message.
pub const DEFAULT_TEMPLATE: &str = "The :attribute field is invalid.";

/// A registered rule: check function, message template, and optional
/// replacer. One plain record, no hierarchy.
#[derive(Clone)]
pub struct RuleDefinition {
    pub name: String,
    validate: ValidateFn,
    pub message: String,
    replacer: Option<ReplacerFn>,
    gate: bool,
}

impl RuleDefinition {
    /// Build a definition with the fallback message template.
    pub fn new(
        name: impl Into<String>,
        validate: impl Fn(Option<&Value>, &str, &str, &Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            validate: Arc::new(validate),
            message: DEFAULT_TEMPLATE.to_string(),
            replacer: None,
            gate: false,
        }
    }

    /// Set the error-message template (`:attribute`, `:value`, and any
    /// replacer-provided tokens).
    pub fn with_message(mut self, template: impl Into<String>) -> Self {
        self.message = template.into();
        self
    }

    /// Install a replacer. Without one, `:value` substitutes to the raw
    /// requirement string.
    pub fn with_replacer(
        mut self,
        replacer: impl Fn(&str) -> HashMap<String, String> + Send + Sync + 'static,
    ) -> Self {
        self.replacer = Some(Arc::new(replacer));
        self
    }

    /// Mark this rule as a conditional gate (the `nullable`/`sometimes`
    /// family). For a gate, the check function's `true` is a skip signal:
    /// the engine stops processing the field's remaining rules. Gates never
    /// record failures.
    pub fn gate(mut self) -> Self {
        self.gate = true;
        self
    }

    pub fn is_gate(&self) -> bool {
        self.gate
    }

    /// Invoke the check function.
    pub fn validate(
        &self,
        value: Option<&Value>,
        requirement: &str,
        attribute: &str,
        input: &Value,
    ) -> bool {
        (self.validate)(value, requirement, attribute, input)
    }

    /// Run the replacer, if one is installed.
    pub fn replacements(&self, requirement: &str) -> Option<HashMap<String, String>> {
        self.replacer.as_ref().map(|r| r(requirement))
    }
}

impl fmt::Debug for RuleDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleDefinition")
            .field("name", &self.name)
            .field("message", &self.message)
            .field("replacer", &self.replacer.is_some())
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}

/// A shared handle to a rule table.
///
/// Cloning is cheap and clones observe the same table. One process-wide
/// instance exists behind [`Registry::global`]; independent instances
/// ([`Registry::new`] / [`Registry::empty`]) give test isolation without
/// changing the override-semantics contract.
///
/// Readers snapshot under a read lock; [`Registry::register`] takes the
/// write lock. A validation run that has already snapshotted is unaffected
/// by later registrations.
#[derive(Clone)]
pub struct Registry {
    rules: Arc<RwLock<HashMap<String, Arc<RuleDefinition>>>>,
}

static GLOBAL: LazyLock<Registry> = LazyLock::new(Registry::new);

impl Registry {
    /// A fresh registry seeded with the built-in rule catalog.
    pub fn new() -> Self {
        let registry = Self::empty();
        crate::rules::register_builtins(&registry);
        registry
    }

    /// A fresh registry with no rules at all.
    pub fn empty() -> Self {
        Self {
            rules: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// The process-wide registry used by [`Validator::new`].
    ///
    /// [`Validator::new`]: crate::validate::Validator::new
    pub fn global() -> Registry {
        GLOBAL.clone()
    }

    /// Insert a definition, overwriting any prior entry of the same name.
    pub fn register(&self, definition: RuleDefinition) {
        let mut rules = self.rules.write().unwrap_or_else(PoisonError::into_inner);
        rules.insert(definition.name.clone(), Arc::new(definition));
    }

    /// Look up a definition by name.
    pub fn get_rule(&self, name: &str) -> Result<Arc<RuleDefinition>, RuleNotFoundError> {
        let rules = self.rules.read().unwrap_or_else(PoisonError::into_inner);
        rules
            .get(name)
            .cloned()
            .ok_or_else(|| RuleNotFoundError::new(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        let rules = self.rules.read().unwrap_or_else(PoisonError::into_inner);
        rules.contains_key(name)
    }

    /// Resolve every distinct name in one pass under a single read lock.
    ///
    /// The returned map is the run's private snapshot: registrations made
    /// after this call apply only to runs that snapshot later.
    pub(crate) fn snapshot<'a>(
        &self,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Result<HashMap<String, Arc<RuleDefinition>>, RuleNotFoundError> {
        let rules = self.rules.read().unwrap_or_else(PoisonError::into_inner);
        let mut snapshot = HashMap::new();
        for name in names {
            if snapshot.contains_key(name) {
                continue;
            }
            match rules.get(name) {
                Some(def) => {
                    snapshot.insert(name.to_string(), Arc::clone(def));
                }
                None => return Err(RuleNotFoundError::new(name)),
            }
        }
        Ok(snapshot)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rules = self.rules.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("Registry")
            .field("rules", &rules.len())
            .finish()
    }
}

// ─── Process-wide conveniences ──────────────────────────────────────────────

/// Register a rule with a message template on the process-wide registry.
pub fn register(
    name: impl Into<String>,
    validate: impl Fn(Option<&Value>, &str, &str, &Value) -> bool + Send + Sync + 'static,
    message: impl Into<String>,
) {
    Registry::global().register(RuleDefinition::new(name, validate).with_message(message));
}

/// Register a rule with a replacer and a message template on the
/// process-wide registry.
pub fn register_with_replacer(
    name: impl Into<String>,
    validate: impl Fn(Option<&Value>, &str, &str, &Value) -> bool + Send + Sync + 'static,
    replacer: impl Fn(&str) -> HashMap<String, String> + Send + Sync + 'static,
    message: impl Into<String>,
) {
    Registry::global().register(
        RuleDefinition::new(name, validate)
            .with_replacer(replacer)
            .with_message(message),
    );
}

/// Look up a rule on the process-wide registry.
pub fn get_rule(name: &str) -> Result<Arc<RuleDefinition>, RuleNotFoundError> {
    Registry::global().get_rule(name)
}
