//! Field-validation primitives shared by all entities.
//!
//! Validation collects the complete set of field violations before failing:
//! every field is checked and contributes at most one reason (its first
//! failing rule), so a payload with three bad fields reports three reasons
//! in a single response. Uniqueness is checked separately by the services so
//! the HTTP boundary can distinguish 400 from 409.

use std::collections::BTreeMap;

use regex::Regex;
use serde_json::{Map, Value, json};

/// Aggregate of field violations, keyed by the JSON field name.
///
/// Ordering is deterministic (BTreeMap) so error bodies are stable.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldViolations {
    reasons: BTreeMap<&'static str, String>,
}

impl FieldViolations {
    /// Create an empty aggregate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation for `field` unless one is already present.
    ///
    /// The first failing rule for a field supplies its message.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.reasons.entry(field).or_insert_with(|| message.into());
    }

    /// Whether any violation was recorded.
    pub fn is_empty(&self) -> bool {
        self.reasons.is_empty()
    }

    /// Number of violated fields.
    pub fn len(&self) -> usize {
        self.reasons.len()
    }

    /// Message recorded for `field`, if any.
    pub fn reason(&self, field: &str) -> Option<&str> {
        self.reasons.get(field).map(String::as_str)
    }

    /// `Ok(())` when empty, `Err(self)` otherwise.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    /// Render the reasons map as a JSON object (field → message).
    pub fn to_details(&self) -> Value {
        let map: Map<String, Value> = self
            .reasons
            .iter()
            .map(|(field, message)| ((*field).to_owned(), json!(message)))
            .collect();
        Value::Object(map)
    }
}

/// Declarative check for a constrained text field.
///
/// Entities declare one rule per field and run them all; each rule reports
/// at most one violation. Length is checked before the character pattern so
/// an empty value yields the size message, not the charset one.
pub(crate) struct TextRule {
    pub field: &'static str,
    pub min: usize,
    pub max: usize,
    pub pattern: fn() -> &'static Regex,
    pub pattern_message: &'static str,
}

impl TextRule {
    pub(crate) fn check(&self, value: &str, violations: &mut FieldViolations) {
        let length = value.chars().count();
        if length < self.min || length > self.max {
            violations.push(
                self.field,
                format!(
                    "The {} must be between {} and {} characters",
                    self.field, self.min, self.max
                ),
            );
            return;
        }
        if !(self.pattern)().is_match(value) {
            violations.push(self.field, self.pattern_message);
        }
    }
}

/// Decide whether a unique-key lookup hit conflicts with the candidate.
///
/// A hit is non-conflicting only when the candidate is an update (has an id)
/// of the very record that was found; a create, or an update of a different
/// record, conflicts.
pub(crate) fn conflicts_with_existing(existing_id: Option<i64>, candidate_id: Option<i64>) -> bool {
    match (existing_id, candidate_id) {
        (Some(existing), Some(candidate)) => existing != candidate,
        _ => true,
    }
}
