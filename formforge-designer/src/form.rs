//! Form lifecycle: `Draft --publish--> Published --archive--> Archived`.
//!
//! Only drafts can be edited. Publishing freezes the document into a shared
//! [`PublishedSchema`]; only published forms accept submissions.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use formforge_fields::{FieldId, FieldRegistry, FieldTypeTag};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ulid::Ulid;

use crate::document::DesignerDocument;
use crate::error::{DesignerError, Result};
use crate::schema::SchemaPayload;
use crate::submission::{self, SubmissionValues, ValidationReport};

/// Where a form is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStatus {
    Draft,
    Published,
    Archived,
}

impl fmt::Display for FormStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FormStatus::Draft => "draft",
            FormStatus::Published => "published",
            FormStatus::Archived => "archived",
        })
    }
}

/// One export column: a field that collects a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub id: FieldId,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldTypeTag,
}

/// A frozen, shareable schema. Validation against it needs no coordination.
#[derive(Debug, Clone)]
pub struct PublishedSchema(Arc<DesignerDocument>);

impl PublishedSchema {
    fn freeze(document: &DesignerDocument) -> Result<Self> {
        // The selection is editor state; a frozen schema does not carry one.
        Ok(Self(Arc::new(document.select(None)?)))
    }

    pub fn document(&self) -> &DesignerDocument {
        &self.0
    }

    pub fn validate(&self, values: &SubmissionValues) -> ValidationReport {
        submission::validate(&self.0, values)
    }

    /// Export columns for the input fields, in document order.
    pub fn columns(&self) -> Vec<ColumnDef> {
        let registry = self.0.registry();
        self.0
            .instances()
            .iter()
            .filter(|i| !registry.is_layout(i.tag()))
            .map(|i| ColumnDef {
                id: i.id().clone(),
                label: i.label().unwrap_or_default().to_string(),
                field_type: i.tag(),
            })
            .collect()
    }
}

/// A form: metadata, lifecycle status and its designer document.
#[derive(Debug, Clone)]
pub struct Form {
    id: Ulid,
    name: String,
    description: Option<String>,
    status: FormStatus,
    created_at: DateTime<Utc>,
    published_at: Option<DateTime<Utc>>,
    document: DesignerDocument,
    published: Option<PublishedSchema>,
}

impl Form {
    /// A new, empty draft.
    pub fn new(name: impl Into<String>, registry: Arc<FieldRegistry>) -> Self {
        Self {
            id: Ulid::new(),
            name: name.into(),
            description: None,
            status: FormStatus::Draft,
            created_at: Utc::now(),
            published_at: None,
            document: DesignerDocument::with_registry(registry),
            published: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn id(&self) -> Ulid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at
    }

    pub fn document(&self) -> &DesignerDocument {
        &self.document
    }

    /// The frozen schema, once published.
    pub fn schema(&self) -> Option<&PublishedSchema> {
        self.published.as_ref()
    }

    /// Apply a document operation. Drafts only.
    pub fn edit<F>(&mut self, op: F) -> Result<()>
    where
        F: FnOnce(&DesignerDocument) -> Result<DesignerDocument>,
    {
        self.edit_returning(|doc| op(doc).map(|next| (next, ())))
    }

    /// Apply a document operation that also yields a value, such as the id
    /// of an inserted field. Drafts only.
    pub fn edit_returning<T, F>(&mut self, op: F) -> Result<T>
    where
        F: FnOnce(&DesignerDocument) -> Result<(DesignerDocument, T)>,
    {
        if self.status != FormStatus::Draft {
            return Err(DesignerError::FormNotEditable {
                name: self.name.clone(),
                status: self.status,
            });
        }
        let (next, value) = op(&self.document)?;
        self.document = next;
        Ok(value)
    }

    /// Freeze the document and start accepting submissions.
    ///
    /// Requires at least one field that collects a value.
    pub fn publish(&mut self) -> Result<PublishedSchema> {
        if self.status != FormStatus::Draft {
            return Err(DesignerError::InvalidTransition {
                action: "publish",
                status: self.status,
            });
        }
        if !self.document.has_input_fields() {
            return Err(DesignerError::NothingToPublish {
                name: self.name.clone(),
            });
        }
        let schema = PublishedSchema::freeze(&self.document)?;
        self.document = schema.document().clone();
        self.status = FormStatus::Published;
        self.published_at = Some(Utc::now());
        self.published = Some(schema.clone());
        debug!(form = %self.id, fields = self.document.len(), "published form");
        Ok(schema)
    }

    /// Stop accepting submissions. Published forms only.
    pub fn archive(&mut self) -> Result<()> {
        if self.status != FormStatus::Published {
            return Err(DesignerError::InvalidTransition {
                action: "archive",
                status: self.status,
            });
        }
        self.status = FormStatus::Archived;
        debug!(form = %self.id, "archived form");
        Ok(())
    }

    /// Validate a submission. Published forms only.
    pub fn validate_submission(&self, values: &SubmissionValues) -> Result<ValidationReport> {
        match (&self.published, self.status) {
            (Some(schema), FormStatus::Published) => Ok(schema.validate(values)),
            _ => Err(DesignerError::FormNotPublished {
                name: self.name.clone(),
                status: self.status,
            }),
        }
    }

    /// The persisted form of this form.
    pub fn to_record(&self) -> Result<FormRecord> {
        Ok(FormRecord {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            status: self.status,
            created_at: self.created_at,
            published_at: self.published_at,
            schema: self.document.serialize()?,
        })
    }

    /// Rebuild a form from its persisted record.
    pub fn from_record(registry: Arc<FieldRegistry>, record: FormRecord) -> Result<Self> {
        let document = DesignerDocument::deserialize(registry, record.schema)?;
        let published = match record.status {
            FormStatus::Draft => None,
            FormStatus::Published | FormStatus::Archived => {
                Some(PublishedSchema::freeze(&document)?)
            }
        };
        Ok(Self {
            id: record.id,
            name: record.name,
            description: record.description,
            status: record.status,
            created_at: record.created_at,
            published_at: record.published_at,
            document,
            published,
        })
    }
}

/// Persisted shape of a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormRecord {
    pub id: Ulid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: FormStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    pub schema: SchemaPayload,
}
