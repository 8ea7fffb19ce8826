//! Error types for the designer

use formforge_fields::{ConfigIssue, FieldsError};
use thiserror::Error;

use crate::form::FormStatus;

/// Result type for designer operations
pub type Result<T> = std::result::Result<T, DesignerError>;

/// Errors that can occur in designer operations
#[derive(Debug, Error)]
pub enum DesignerError {
    /// Registry error: unknown type, rejected or undecodable configuration
    #[error(transparent)]
    Field(#[from] FieldsError),

    /// Position outside the document
    #[error("index {index} out of range for {len} fields")]
    InvalidIndex { index: i64, len: usize },

    /// No instance with this id in the document
    #[error("field instance not found: {id}")]
    InstanceNotFound { id: String },

    /// Two instances in one payload share an id
    #[error("duplicate field instance ID: {id}")]
    DuplicateInstanceId { id: String },

    /// Payload written by an incompatible schema version
    #[error("unsupported schema version {found} (supported: {supported})")]
    UnsupportedSchemaVersion { found: u32, supported: u32 },

    /// Payload values encoded differently from this build
    #[error("unsupported value encoding: version {version}, delimiter '{delimiter}'")]
    UnsupportedValueEncoding { version: u32, delimiter: String },

    /// Form is not a draft
    #[error("form '{name}' is {status} and cannot be edited")]
    FormNotEditable { name: String, status: FormStatus },

    /// Submissions are only accepted by published forms
    #[error("form '{name}' is {status}, not published")]
    FormNotPublished { name: String, status: FormStatus },

    /// Publishing needs at least one field that collects a value
    #[error("form '{name}' has no input fields to publish")]
    NothingToPublish { name: String },

    /// Lifecycle transition not allowed from the current status
    #[error("cannot {action} a form that is {status}")]
    InvalidTransition {
        action: &'static str,
        status: FormStatus,
    },

    /// Form not present in the store
    #[error("form not found: {id}")]
    FormNotFound { id: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl DesignerError {
    /// Create an instance not found error
    pub fn instance_not_found(id: impl Into<String>) -> Self {
        Self::InstanceNotFound { id: id.into() }
    }

    /// Create an invalid index error
    pub fn invalid_index(index: impl TryInto<i64>, len: usize) -> Self {
        Self::InvalidIndex {
            index: index.try_into().unwrap_or(i64::MAX),
            len,
        }
    }

    /// Configuration issues, when a configuration was rejected.
    pub fn issues(&self) -> &[ConfigIssue] {
        match self {
            Self::Field(e) => e.issues(),
            _ => &[],
        }
    }

    /// Whether the caller can keep its previous state and carry on.
    ///
    /// Rejected configurations and stale indexes or ids are recoverable.
    /// Unknown types, broken payloads and IO failures abort the operation.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Field(FieldsError::InvalidConfiguration { .. })
                | Self::InvalidIndex { .. }
                | Self::InstanceNotFound { .. }
                | Self::FormNotEditable { .. }
                | Self::FormNotPublished { .. }
                | Self::NothingToPublish { .. }
                | Self::InvalidTransition { .. }
        )
    }
}
