//! Persisted schema payload.
//!
//! A payload is the document's instances as `{id, type, configuration}`
//! records plus the versions needed to read them back. Selection is editor
//! state and never persisted.

use formforge_fields::{FieldRecord, ValueEncoding};
use serde::{Deserialize, Serialize};

use crate::error::{DesignerError, Result};

/// Current schema payload version.
pub const SCHEMA_VERSION: u32 = 1;

/// Persistence-ready form of a designer document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaPayload {
    pub schema_version: u32,
    #[serde(default)]
    pub value_encoding: ValueEncoding,
    #[serde(default)]
    pub fields: Vec<FieldRecord>,
}

impl SchemaPayload {
    pub fn new(fields: Vec<FieldRecord>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            value_encoding: ValueEncoding::default(),
            fields,
        }
    }

    /// Fail unless this build can read the payload.
    pub fn check_compatible(&self) -> Result<()> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(DesignerError::UnsupportedSchemaVersion {
                found: self.schema_version,
                supported: SCHEMA_VERSION,
            });
        }
        if !self.value_encoding.is_supported() {
            return Err(DesignerError::UnsupportedValueEncoding {
                version: self.value_encoding.version,
                delimiter: self.value_encoding.choice_delimiter.clone(),
            });
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(text)?)
    }
}

impl Default for SchemaPayload {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
