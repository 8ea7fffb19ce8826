//! Error types for the field registry

use thiserror::Error;

use crate::configuration::ConfigIssue;
use crate::tag::FieldTypeTag;

/// Result type for field operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors that can occur in field registry operations
#[derive(Debug, Error)]
pub enum FieldsError {
    /// Tag is not registered (or not a tag at all)
    #[error("unknown field type: {tag}")]
    UnknownFieldType { tag: String },

    /// A configuration was rejected by its type's validator
    #[error("invalid configuration for {tag}: {}", format_issues(.issues))]
    InvalidConfiguration {
        tag: FieldTypeTag,
        issues: Vec<ConfigIssue>,
    },

    /// A persisted configuration could not be decoded into its type's shape
    #[error("cannot decode {tag} configuration: {source}")]
    ConfigurationDecode {
        tag: FieldTypeTag,
        source: serde_json::Error,
    },
}

impl FieldsError {
    /// Create an invalid configuration error
    pub fn invalid_configuration(tag: FieldTypeTag, issues: Vec<ConfigIssue>) -> Self {
        Self::InvalidConfiguration { tag, issues }
    }

    /// Issues attached to an invalid configuration, empty for other errors.
    pub fn issues(&self) -> &[ConfigIssue] {
        match self {
            Self::InvalidConfiguration { issues, .. } => issues,
            _ => &[],
        }
    }
}

fn format_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
