//! DesignerDocument: the ordered fields of one form plus the selection.
//!
//! Every operation takes `&self` and returns a new document, so holders of
//! an earlier state never observe a change. Instances carry ids generated
//! here; configuration edits go through the registry's validator.

use std::collections::HashSet;
use std::sync::Arc;

use formforge_fields::{FieldConfig, FieldId, FieldInstance, FieldRegistry, FieldTypeTag};
use tracing::debug;

use crate::error::{DesignerError, Result};
use crate::schema::SchemaPayload;

/// Ordered field instances and the currently selected one.
///
/// Invariants: ids are unique, and a selection always names an instance in
/// the document.
#[derive(Debug, Clone)]
pub struct DesignerDocument {
    registry: Arc<FieldRegistry>,
    instances: Vec<FieldInstance>,
    selected: Option<FieldId>,
}

impl DesignerDocument {
    /// Empty document backed by the process-wide registry.
    pub fn new() -> Self {
        Self::with_registry(FieldRegistry::global())
    }

    /// Empty document backed by `registry`.
    pub fn with_registry(registry: Arc<FieldRegistry>) -> Self {
        Self {
            registry,
            instances: Vec::new(),
            selected: None,
        }
    }

    pub fn registry(&self) -> &Arc<FieldRegistry> {
        &self.registry
    }

    /// Instances in document order.
    pub fn instances(&self) -> &[FieldInstance] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&FieldInstance> {
        self.instances.iter().find(|i| i.id().as_str() == id)
    }

    /// Position of the instance in document order.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.instances.iter().position(|i| i.id().as_str() == id)
    }

    pub fn selected_id(&self) -> Option<&FieldId> {
        self.selected.as_ref()
    }

    pub fn selected(&self) -> Option<&FieldInstance> {
        self.selected.as_ref().and_then(|id| self.get(id.as_str()))
    }

    /// Whether any instance collects a value.
    pub fn has_input_fields(&self) -> bool {
        self.instances
            .iter()
            .any(|i| !self.registry.is_layout(i.tag()))
    }

    /// Insert a new instance of `tag` at `at` (default: the end).
    ///
    /// Returns the new document and the generated id.
    pub fn insert(&self, tag: FieldTypeTag, at: Option<usize>) -> Result<(Self, FieldId)> {
        let len = self.len();
        let at = at.unwrap_or(len);
        if at > len {
            return Err(DesignerError::invalid_index(at, len));
        }

        let id = self.fresh_id();
        let instance = self.registry.construct(tag, id.clone())?;

        let mut next = self.clone();
        next.instances.insert(at, instance);
        debug!(%id, %tag, index = at, "inserted field");
        Ok((next, id))
    }

    /// Remove an instance, clearing the selection if it was selected.
    pub fn remove_by_id(&self, id: &str) -> Result<Self> {
        let index = self.require_index(id)?;

        let mut next = self.clone();
        next.instances.remove(index);
        if next.selected.as_ref().is_some_and(|s| s.as_str() == id) {
            next.selected = None;
        }
        debug!(id, index, "removed field");
        Ok(next)
    }

    /// Move an instance to `new_index`, keeping the relative order of the rest.
    ///
    /// `new_index` must be a current position; out-of-range targets fail with
    /// `InvalidIndex` instead of clamping.
    pub fn move_to(&self, id: &str, new_index: usize) -> Result<Self> {
        let index = self.require_index(id)?;
        if new_index >= self.len() {
            return Err(DesignerError::invalid_index(new_index, self.len()));
        }

        let mut next = self.clone();
        let instance = next.instances.remove(index);
        next.instances.insert(new_index, instance);
        debug!(id, from = index, to = new_index, "moved field");
        Ok(next)
    }

    /// Replace an instance's configuration.
    ///
    /// The configuration must belong to the instance's type and pass its
    /// validator; otherwise nothing changes and the issues are returned.
    pub fn update_configuration(&self, id: &str, config: FieldConfig) -> Result<Self> {
        let index = self.require_index(id)?;
        let updated = self.registry.reconfigure(&self.instances[index], config)?;

        let mut next = self.clone();
        next.instances[index] = updated;
        debug!(id, "updated field configuration");
        Ok(next)
    }

    /// Set or clear the selection.
    pub fn select(&self, id: Option<&str>) -> Result<Self> {
        let selected = match id {
            Some(id) => Some(
                self.get(id)
                    .ok_or_else(|| DesignerError::instance_not_found(id))?
                    .id()
                    .clone(),
            ),
            None => None,
        };
        let mut next = self.clone();
        next.selected = selected;
        Ok(next)
    }

    /// Copy an instance under a fresh id, placed right after the original.
    pub fn duplicate(&self, id: &str) -> Result<(Self, FieldId)> {
        let index = self.require_index(id)?;
        let new_id = self.fresh_id();
        let copy = self.instances[index].with_id(new_id.clone());

        let mut next = self.clone();
        next.instances.insert(index + 1, copy);
        debug!(id, %new_id, "duplicated field");
        Ok((next, new_id))
    }

    /// The persisted form of this document.
    pub fn serialize(&self) -> Result<SchemaPayload> {
        let fields = self
            .instances
            .iter()
            .map(FieldInstance::to_record)
            .collect::<serde_json::Result<Vec<_>>>()?;
        Ok(SchemaPayload::new(fields))
    }

    /// Rebuild a document from its persisted form.
    ///
    /// Every record must name a registered type, carry a unique id and hold a
    /// configuration its type accepts. Any failure aborts the whole load.
    /// Missing configuration attributes take the type's defaults.
    pub fn deserialize(registry: Arc<FieldRegistry>, payload: SchemaPayload) -> Result<Self> {
        payload.check_compatible()?;

        let mut seen = HashSet::new();
        let mut instances = Vec::with_capacity(payload.fields.len());
        for record in payload.fields {
            if !seen.insert(record.id.clone()) {
                return Err(DesignerError::DuplicateInstanceId {
                    id: record.id.to_string(),
                });
            }
            instances.push(registry.instantiate(record)?);
        }

        debug!(fields = instances.len(), "loaded designer document");
        Ok(Self {
            registry,
            instances,
            selected: None,
        })
    }

    fn require_index(&self, id: &str) -> Result<usize> {
        self.index_of(id)
            .ok_or_else(|| DesignerError::instance_not_found(id))
    }

    fn fresh_id(&self) -> FieldId {
        loop {
            let id = FieldId::new();
            if self.get(id.as_str()).is_none() {
                return id;
            }
        }
    }
}

impl Default for DesignerDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// Documents are equal when they hold the same instances in the same order.
/// Selection is editor state and the backing registry is shared, so neither
/// is compared; use [`DesignerDocument::selected_id`] to compare selections.
impl PartialEq for DesignerDocument {
    fn eq(&self, other: &Self) -> bool {
        self.instances == other.instances
    }
}

/// Convert a user-supplied position. Negative input is an `InvalidIndex`
/// against the document length `len`; the upper bound is left to the operation.
pub fn checked_index(index: i64, len: usize) -> Result<usize> {
    usize::try_from(index).map_err(|_| DesignerError::invalid_index(index, len))
}
