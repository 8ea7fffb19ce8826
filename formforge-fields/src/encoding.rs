//! String encoding of submitted values.
//!
//! Submissions travel as `id → string`. Booleans are the literals `"true"` and
//! `"false"`; multi-valued choices are joined with [`CHOICE_DELIMITER`].
//! Changing either is a breaking change for already-collected submissions, so
//! the encoding carries a version that schemas persist alongside their fields.

use serde::{Deserialize, Serialize};

/// Current value encoding version.
pub const VALUE_ENCODING_VERSION: u32 = 1;

/// Separator between entries of a multi-valued choice.
pub const CHOICE_DELIMITER: &str = ",";

pub const TRUE_LITERAL: &str = "true";
pub const FALSE_LITERAL: &str = "false";

/// The value encoding a schema was authored against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueEncoding {
    pub version: u32,
    pub choice_delimiter: String,
}

impl Default for ValueEncoding {
    fn default() -> Self {
        Self {
            version: VALUE_ENCODING_VERSION,
            choice_delimiter: CHOICE_DELIMITER.to_string(),
        }
    }
}

impl ValueEncoding {
    /// Whether this build can read values in this encoding.
    pub fn is_supported(&self) -> bool {
        self.version == VALUE_ENCODING_VERSION && self.choice_delimiter == CHOICE_DELIMITER
    }
}

/// True when the value is empty or whitespace only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Join choice entries into one submitted value.
pub fn encode_choices<I, S>(choices: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    choices
        .into_iter()
        .map(|c| c.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(CHOICE_DELIMITER)
}

/// Split a submitted choice value into trimmed entries. Blank means no entries.
pub fn decode_choices(value: &str) -> Vec<&str> {
    if is_blank(value) {
        return Vec::new();
    }
    value.split(CHOICE_DELIMITER).map(str::trim).collect()
}

pub fn encode_bool(value: bool) -> &'static str {
    if value {
        TRUE_LITERAL
    } else {
        FALSE_LITERAL
    }
}

/// Parse a boolean literal. Anything but `"true"`/`"false"` is `None`.
pub fn decode_bool(value: &str) -> Option<bool> {
    match value.trim() {
        TRUE_LITERAL => Some(true),
        FALSE_LITERAL => Some(false),
        _ => None,
    }
}
