//! Declarative rule-based field validation for JSON-shaped data.
//!
//! Given an input object and per-field rule expressions such as
//! `"required|min:5|greater_than:21"`, the engine checks each field,
//! collects human-readable failure messages, and lets consumers register
//! new rule types and message templates at runtime:
//!
//! ```text
//! rules bag → parse → field rules → Validator drives resolve + registry
//!                                 → ErrorBag → passes() / fails()
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use fieldcheck::{Rules, Validator};
//! use serde_json::json;
//!
//! let rules = Rules::new()
//!     .field("email", "required|email")
//!     .field("age", "required|integer|min:18");
//!
//! let mut validator = Validator::new(
//!     json!({"email": "ada@example.com", "age": 36}),
//!     &rules,
//! );
//! assert!(validator.passes().unwrap());
//! ```
//!
//! # Custom rules
//!
//! Rules are registered at runtime through the same path the built-ins
//! use, so re-registering a name (including a built-in) simply replaces it:
//!
//! ```rust
//! use fieldcheck::{Registry, RuleDefinition, Rules, Validator};
//! use serde_json::json;
//!
//! let registry = Registry::new();
//! registry.register(
//!     RuleDefinition::new("greater_than", |value, req, _attr, _input| {
//!         match (value.and_then(|v| v.as_f64()), req.parse::<f64>()) {
//!             (Some(v), Ok(bound)) => v > bound,
//!             _ => false,
//!         }
//!     })
//!     .with_replacer(|req| {
//!         std::iter::once(("value".to_string(), req.to_string())).collect()
//!     })
//!     .with_message("The :attribute field should be greater than :value."),
//! );
//!
//! let rules = Rules::new().field("age", "greater_than:21");
//! let mut validator = Validator::with_registry(registry, json!({"age": 18}), &rules);
//! assert!(validator.fails().unwrap());
//! assert_eq!(
//!     validator.errors().first("age"),
//!     Some("The age field should be greater than 21."),
//! );
//! ```

pub mod bag;
pub mod error;
pub mod message;
pub mod parse;
pub mod registry;
pub mod resolve;
pub mod validate;

pub(crate) mod rules;

pub use bag::ErrorBag;
pub use error::RuleNotFoundError;
pub use parse::{ParsedRule, Rules};
pub use registry::{Registry, RuleDefinition};
pub use validate::{GatePolicy, Validator};

// Re-export the process-wide registry operations at the crate root.
pub use registry::{get_rule, register, register_with_replacer};

/// Result of the [`check`] convenience entry point.
#[derive(Clone, Debug)]
pub struct CheckResult {
    /// Whether every field satisfied its rules.
    pub passed: bool,
    /// Failure messages, ordered by rules-bag declaration.
    pub errors: ErrorBag,
}

impl CheckResult {
    pub fn is_valid(&self) -> bool {
        self.passed
    }
}

/// Convenience entry point: one validation run against the process-wide
/// registry.
///
/// # Errors
///
/// Returns [`RuleNotFoundError`] if the rules bag references an
/// unregistered rule name.
///
/// # Example
///
/// ```rust
/// use fieldcheck::Rules;
/// use serde_json::json;
///
/// let rules = Rules::new().field("name", "required|string");
/// let result = fieldcheck::check(json!({"name": 7}), &rules).unwrap();
/// assert!(!result.is_valid());
/// assert!(result.errors.has("name"));
/// ```
pub fn check(input: serde_json::Value, rules: &Rules) -> Result<CheckResult, RuleNotFoundError> {
    let mut validator = Validator::new(input, rules);
    let passed = validator.evaluate()?;
    Ok(CheckResult {
        passed,
        errors: validator.into_errors(),
    })
}
