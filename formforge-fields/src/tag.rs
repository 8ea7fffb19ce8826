//! The closed set of field type tags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FieldsError;

/// Names one kind of form field. Persisted by its `…Field` name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldTypeTag {
    #[serde(rename = "TextField")]
    Text,
    #[serde(rename = "EmailField")]
    Email,
    #[serde(rename = "NumberField")]
    Number,
    #[serde(rename = "TextAreaField")]
    TextArea,
    #[serde(rename = "DateField")]
    Date,
    #[serde(rename = "CheckboxField")]
    Checkbox,
    #[serde(rename = "CheckboxGroupField")]
    CheckboxGroup,
    #[serde(rename = "SelectField")]
    Select,
    #[serde(rename = "TitleField")]
    Title,
    #[serde(rename = "SubTitleField")]
    SubTitle,
    #[serde(rename = "ParagraphField")]
    Paragraph,
    #[serde(rename = "SeparatorField")]
    Separator,
    #[serde(rename = "SpacerField")]
    Spacer,
}

impl FieldTypeTag {
    /// Every tag, in palette order.
    pub const ALL: [FieldTypeTag; 13] = [
        FieldTypeTag::Text,
        FieldTypeTag::Email,
        FieldTypeTag::Number,
        FieldTypeTag::TextArea,
        FieldTypeTag::Date,
        FieldTypeTag::Checkbox,
        FieldTypeTag::CheckboxGroup,
        FieldTypeTag::Select,
        FieldTypeTag::Title,
        FieldTypeTag::SubTitle,
        FieldTypeTag::Paragraph,
        FieldTypeTag::Separator,
        FieldTypeTag::Spacer,
    ];

    /// The persisted name of this tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldTypeTag::Text => "TextField",
            FieldTypeTag::Email => "EmailField",
            FieldTypeTag::Number => "NumberField",
            FieldTypeTag::TextArea => "TextAreaField",
            FieldTypeTag::Date => "DateField",
            FieldTypeTag::Checkbox => "CheckboxField",
            FieldTypeTag::CheckboxGroup => "CheckboxGroupField",
            FieldTypeTag::Select => "SelectField",
            FieldTypeTag::Title => "TitleField",
            FieldTypeTag::SubTitle => "SubTitleField",
            FieldTypeTag::Paragraph => "ParagraphField",
            FieldTypeTag::Separator => "SeparatorField",
            FieldTypeTag::Spacer => "SpacerField",
        }
    }
}

impl fmt::Display for FieldTypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldTypeTag {
    type Err = FieldsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldTypeTag::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| FieldsError::UnknownFieldType { tag: s.to_string() })
    }
}
