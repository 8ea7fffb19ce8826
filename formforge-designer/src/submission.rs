//! Submission validation.
//!
//! A submission is a map from field id to its string-encoded value. Every
//! field in the document gets a verdict; nothing short-circuits and nothing
//! raises, so callers can highlight every invalid field at once.

use std::collections::HashMap;

use formforge_fields::FieldId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::document::DesignerDocument;

/// Submitted values keyed by field id. Absent keys read as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionValues(HashMap<String, String>);

impl SubmissionValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field's value, returning `self` for chaining.
    pub fn with(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(id, value);
        self
    }

    pub fn insert(&mut self, id: impl Into<String>, value: impl Into<String>) {
        self.0.insert(id.into(), value.into());
    }

    /// The submitted value for `id`, empty when absent.
    pub fn value(&self, id: &str) -> &str {
        self.0.get(id).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SubmissionValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Per-field verdicts in document order, plus the aggregate decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub per_field: IndexMap<FieldId, bool>,
    pub all_valid: bool,
}

impl ValidationReport {
    fn from_verdicts(per_field: IndexMap<FieldId, bool>) -> Self {
        let all_valid = per_field.values().all(|v| *v);
        Self {
            per_field,
            all_valid,
        }
    }

    /// Verdict for one field, `None` when it is not in the schema.
    pub fn is_valid(&self, id: &str) -> Option<bool> {
        self.per_field.get(id).copied()
    }

    /// Ids of rejected fields, in document order.
    pub fn invalid_fields(&self) -> impl Iterator<Item = &FieldId> {
        self.per_field
            .iter()
            .filter(|(_, valid)| !**valid)
            .map(|(id, _)| id)
    }
}

/// Validate a submission against every field of `document`.
///
/// Keys that name no field are ignored. An empty document is vacuously valid.
pub fn validate(document: &DesignerDocument, values: &SubmissionValues) -> ValidationReport {
    let registry = document.registry();
    let mut per_field = IndexMap::with_capacity(document.len());

    for instance in document.instances() {
        let value = values.value(instance.id().as_str());
        let valid = match registry.validate_value(instance, value) {
            Ok(valid) => valid,
            Err(e) => {
                warn!(id = %instance.id(), %e, "field type not registered, rejecting value");
                false
            }
        };
        trace!(id = %instance.id(), tag = %instance.tag(), valid, "field verdict");
        per_field.insert(instance.id().clone(), valid);
    }

    ValidationReport::from_verdicts(per_field)
}
