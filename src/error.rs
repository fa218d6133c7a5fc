use serde::{Deserialize, Serialize};
use std::fmt;

/// Produced when a rules bag references a rule name that is absent from the
/// registry snapshot taken at the start of a validation run.
///
/// A misspelled rule name is a programming error, not a data-validation
/// failure: it aborts the run and is never recorded in the [`ErrorBag`].
/// An empty rule name (a malformed spec such as `"required|"`) surfaces
/// through the same path so that misconfigured rules bags cannot silently
/// pass.
///
/// [`ErrorBag`]: crate::bag::ErrorBag
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleNotFoundError {
    /// The rule name that failed to resolve.
    pub name: String,
}

impl RuleNotFoundError {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for RuleNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "empty rule name in rule spec")
        } else {
            write!(f, "unknown validation rule: '{}'", self.name)
        }
    }
}

impl std::error::Error for RuleNotFoundError {}
