//! Per-type configuration payloads and the limits their validators enforce.
//!
//! Every field type owns exactly one [`FieldConfig`] variant. Configurations
//! serialize as plain objects (`{label, placeholder, …}`); the type tag lives
//! beside them on the [`FieldInstance`](crate::FieldInstance), never inside.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::tag::FieldTypeTag;

/// Configuration of text-like fields (text, email, date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextConfig {
    pub label: String,
    pub placeholder: String,
    pub helper_text: String,
    pub required: bool,
}

/// Configuration of a multi-line text area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAreaConfig {
    pub label: String,
    pub placeholder: String,
    pub helper_text: String,
    pub required: bool,
    pub rows: u32,
}

/// Configuration of a numeric field with optional inclusive bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberConfig {
    pub label: String,
    pub placeholder: String,
    pub helper_text: String,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Configuration of choice fields (checkbox, checkbox group, select).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceConfig {
    pub label: String,
    pub helper_text: String,
    pub required: bool,
    #[serde(default)]
    pub options: Vec<String>,
}

/// Title and subtitle display blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingConfig {
    pub title: String,
}

/// Free-text paragraph display block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphConfig {
    pub text: String,
}

/// Vertical spacer, height in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpacerConfig {
    pub height: u32,
}

/// A separator has nothing to configure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeparatorConfig {}

/// The configuration payload of a field instance, one variant per tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldConfig {
    Text(TextConfig),
    Email(TextConfig),
    Number(NumberConfig),
    TextArea(TextAreaConfig),
    Date(TextConfig),
    Checkbox(ChoiceConfig),
    CheckboxGroup(ChoiceConfig),
    Select(ChoiceConfig),
    Title(HeadingConfig),
    SubTitle(HeadingConfig),
    Paragraph(ParagraphConfig),
    Separator(SeparatorConfig),
    Spacer(SpacerConfig),
}

impl FieldConfig {
    /// The tag this configuration belongs to.
    pub fn tag(&self) -> FieldTypeTag {
        match self {
            FieldConfig::Text(_) => FieldTypeTag::Text,
            FieldConfig::Email(_) => FieldTypeTag::Email,
            FieldConfig::Number(_) => FieldTypeTag::Number,
            FieldConfig::TextArea(_) => FieldTypeTag::TextArea,
            FieldConfig::Date(_) => FieldTypeTag::Date,
            FieldConfig::Checkbox(_) => FieldTypeTag::Checkbox,
            FieldConfig::CheckboxGroup(_) => FieldTypeTag::CheckboxGroup,
            FieldConfig::Select(_) => FieldTypeTag::Select,
            FieldConfig::Title(_) => FieldTypeTag::Title,
            FieldConfig::SubTitle(_) => FieldTypeTag::SubTitle,
            FieldConfig::Paragraph(_) => FieldTypeTag::Paragraph,
            FieldConfig::Separator(_) => FieldTypeTag::Separator,
            FieldConfig::Spacer(_) => FieldTypeTag::Spacer,
        }
    }

    /// The input label, for fields that collect a value.
    pub fn label(&self) -> Option<&str> {
        match self {
            FieldConfig::Text(c) | FieldConfig::Email(c) | FieldConfig::Date(c) => Some(&c.label),
            FieldConfig::Number(c) => Some(&c.label),
            FieldConfig::TextArea(c) => Some(&c.label),
            FieldConfig::Checkbox(c) | FieldConfig::CheckboxGroup(c) | FieldConfig::Select(c) => {
                Some(&c.label)
            }
            _ => None,
        }
    }

    /// Whether a value must be submitted. Layout fields are never required.
    pub fn is_required(&self) -> bool {
        match self {
            FieldConfig::Text(c) | FieldConfig::Email(c) | FieldConfig::Date(c) => c.required,
            FieldConfig::Number(c) => c.required,
            FieldConfig::TextArea(c) => c.required,
            FieldConfig::Checkbox(c) | FieldConfig::CheckboxGroup(c) | FieldConfig::Select(c) => {
                c.required
            }
            _ => false,
        }
    }

    /// Choice options, for choice fields.
    pub fn options(&self) -> Option<&[String]> {
        match self {
            FieldConfig::Checkbox(c) | FieldConfig::CheckboxGroup(c) | FieldConfig::Select(c) => {
                Some(&c.options)
            }
            _ => None,
        }
    }
}

/// A single configuration rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigIssue {
    pub attribute: String,
    pub message: String,
}

impl ConfigIssue {
    pub fn new(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            message: message.into(),
        }
    }

    /// The configuration handed to a validator belongs to another type.
    pub fn type_mismatch(expected: FieldTypeTag, actual: FieldTypeTag) -> Self {
        Self::new(
            "type",
            format!("expected {expected} configuration, got {actual}"),
        )
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.attribute, self.message)
    }
}

/// Inclusive lower/upper bound on a length, count or size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: usize,
    pub max: usize,
}

impl Bounds {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, n: usize) -> bool {
        (self.min..=self.max).contains(&n)
    }

    pub fn is_well_formed(&self) -> bool {
        self.min <= self.max
    }
}

/// Limits applied by configuration validators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldLimits {
    /// Characters in a field label
    pub label: Bounds,
    /// Maximum characters in a placeholder
    pub placeholder_max: usize,
    /// Maximum characters in helper text
    pub helper_text_max: usize,
    /// Characters in a title or subtitle
    pub title: Bounds,
    /// Characters in a paragraph
    pub paragraph: Bounds,
    /// Visible rows of a text area
    pub rows: Bounds,
    /// Spacer height in pixels
    pub spacer_height: Bounds,
    /// Maximum number of choice options
    pub options_max: usize,
}

impl Default for FieldLimits {
    fn default() -> Self {
        Self {
            label: Bounds::new(2, 50),
            placeholder_max: 50,
            helper_text_max: 200,
            title: Bounds::new(2, 50),
            paragraph: Bounds::new(2, 500),
            rows: Bounds::new(1, 10),
            spacer_height: Bounds::new(5, 200),
            options_max: 50,
        }
    }
}

impl FieldLimits {
    /// Names of bounds whose minimum exceeds their maximum.
    pub fn malformed_bounds(&self) -> Vec<&'static str> {
        [
            ("label", self.label),
            ("title", self.title),
            ("paragraph", self.paragraph),
            ("rows", self.rows),
            ("spacer_height", self.spacer_height),
        ]
        .into_iter()
        .filter(|(_, b)| !b.is_well_formed())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Check a character count against inclusive bounds.
pub(crate) fn check_length(
    issues: &mut Vec<ConfigIssue>,
    attribute: &str,
    value: &str,
    bounds: Bounds,
) {
    let len = value.chars().count();
    if len < bounds.min {
        issues.push(ConfigIssue::new(
            attribute,
            format!("must be at least {} characters", bounds.min),
        ));
    } else if len > bounds.max {
        issues.push(ConfigIssue::new(
            attribute,
            format!("must be at most {} characters", bounds.max),
        ));
    }
}

pub(crate) fn check_max_length(
    issues: &mut Vec<ConfigIssue>,
    attribute: &str,
    value: &str,
    max: usize,
) {
    check_length(issues, attribute, value, Bounds::new(0, max));
}

/// Label, placeholder and helper text rules shared by input fields.
pub(crate) fn check_input_texts(
    issues: &mut Vec<ConfigIssue>,
    limits: &FieldLimits,
    label: &str,
    placeholder: Option<&str>,
    helper_text: &str,
) {
    check_length(issues, "label", label, limits.label);
    if let Some(placeholder) = placeholder {
        check_max_length(issues, "placeholder", placeholder, limits.placeholder_max);
    }
    check_max_length(issues, "helper_text", helper_text, limits.helper_text_max);
}

/// Decode a persisted configuration, taking every attribute the payload omits
/// from `default`. Unknown attributes are ignored.
pub(crate) fn decode_with_defaults<T>(default: &T, value: Value) -> serde_json::Result<T>
where
    T: Serialize + DeserializeOwned,
{
    match value {
        Value::Object(patch) => {
            let mut base = serde_json::to_value(default)?;
            if let Value::Object(ref mut map) = base {
                map.extend(patch);
            }
            serde_json::from_value(base)
        }
        Value::Null => serde_json::from_value(serde_json::to_value(default)?),
        other => serde_json::from_value(other),
    }
}
