//! The error bag: ordered per-field failure messages.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Ordered-insertion mapping from field path to failure messages.
///
/// Append-only during a run, queryable after. Field order follows rules-bag
/// declaration order (then wildcard expansion order), never input key
/// order. No deduplication: a rule failing for two wildcard expansions
/// records two messages under two concrete field names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorBag {
    entries: Vec<(String, Vec<String>)>,
}

impl ErrorBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message under a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some((_, messages)) => messages.push(message.into()),
            None => self.entries.push((field, vec![message.into()])),
        }
    }

    /// First message recorded for a field, if any.
    pub fn first(&self, field: &str) -> Option<&str> {
        self.get(field).first().map(String::as_str)
    }

    /// All messages recorded for a field (empty if none).
    pub fn get(&self, field: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, messages)| messages.as_slice())
            .unwrap_or(&[])
    }

    /// Whether at least one message is recorded for a field.
    pub fn has(&self, field: &str) -> bool {
        !self.get(field).is_empty()
    }

    /// All entries in insertion order.
    pub fn all(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    /// Total message count across all fields.
    pub fn count(&self) -> usize {
        self.entries.iter().map(|(_, messages)| messages.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Discard every message recorded for a field.
    pub(crate) fn remove(&mut self, field: &str) {
        self.entries.retain(|(f, _)| f != field);
    }
}

impl Serialize for ErrorBag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, messages) in &self.entries {
            map.serialize_entry(field, messages)?;
        }
        map.end()
    }
}
