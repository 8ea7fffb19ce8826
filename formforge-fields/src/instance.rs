//! Field instances: a field placed in a form.

use std::borrow::Borrow;
use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use ulid::Ulid;

use crate::configuration::FieldConfig;
use crate::tag::FieldTypeTag;

/// Opaque identifier of a field instance.
///
/// Generated ids are ULIDs; loaded ids are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    /// A fresh, unique id.
    pub fn new() -> Self {
        Self(Ulid::new().to_string())
    }

    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FieldId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FieldId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for FieldId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A concrete field in a form: identity plus its type's configuration.
///
/// The type tag is carried by the configuration variant, so an instance can
/// never disagree with itself about what kind of field it is.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldInstance {
    pub(crate) id: FieldId,
    pub(crate) configuration: FieldConfig,
}

impl FieldInstance {
    pub fn id(&self) -> &FieldId {
        &self.id
    }

    pub fn tag(&self) -> FieldTypeTag {
        self.configuration.tag()
    }

    pub fn configuration(&self) -> &FieldConfig {
        &self.configuration
    }

    pub fn label(&self) -> Option<&str> {
        self.configuration.label()
    }

    pub fn is_required(&self) -> bool {
        self.configuration.is_required()
    }

    /// Copy of this instance under another id.
    pub fn with_id(&self, id: FieldId) -> Self {
        Self {
            id,
            configuration: self.configuration.clone(),
        }
    }

    /// Replace the configuration. Callers validate first.
    pub(crate) fn set_configuration(&mut self, configuration: FieldConfig) {
        self.configuration = configuration;
    }

    /// The persisted record of this instance.
    pub fn to_record(&self) -> serde_json::Result<FieldRecord> {
        Ok(FieldRecord {
            id: self.id.clone(),
            type_: self.tag().as_str().to_string(),
            configuration: serde_json::to_value(&self.configuration)?,
        })
    }
}

impl Serialize for FieldInstance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FieldInstance", 3)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("type", &self.tag())?;
        state.serialize_field("configuration", &self.configuration)?;
        state.end()
    }
}

/// Persisted shape of a field instance: `{id, type, configuration}`.
///
/// The type stays a plain string so an unregistered tag surfaces as
/// `UnknownFieldType` from the registry rather than as a parse error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRecord {
    pub id: FieldId,
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default)]
    pub configuration: Value,
}
