//! Single-line text and multi-line text area.

use crate::configuration::{
    check_input_texts, decode_with_defaults, ConfigIssue, FieldConfig, FieldLimits,
    TextAreaConfig, TextConfig,
};
use crate::definition::FieldTypeDefinition;
use crate::encoding::is_blank;
use crate::tag::FieldTypeTag;

fn default_text() -> TextConfig {
    TextConfig {
        label: "Text field".into(),
        placeholder: "Value here...".into(),
        helper_text: "Helper text".into(),
        required: false,
    }
}

fn default_text_area() -> TextAreaConfig {
    TextAreaConfig {
        label: "Text area".into(),
        placeholder: "Value here...".into(),
        helper_text: "Helper text".into(),
        required: false,
        rows: 3,
    }
}

pub(super) fn text_definition() -> FieldTypeDefinition {
    FieldTypeDefinition::new(
        FieldTypeTag::Text,
        "Text Field",
        FieldConfig::Text(default_text()),
        |value| decode_with_defaults(&default_text(), value).map(FieldConfig::Text),
    )
    .with_config_rules(text_rules)
    .with_value_rule(required_not_blank)
}

pub(super) fn text_area_definition() -> FieldTypeDefinition {
    FieldTypeDefinition::new(
        FieldTypeTag::TextArea,
        "Text Area",
        FieldConfig::TextArea(default_text_area()),
        |value| decode_with_defaults(&default_text_area(), value).map(FieldConfig::TextArea),
    )
    .with_config_rules(text_area_rules)
    .with_value_rule(required_not_blank)
}

fn text_rules(config: &FieldConfig, limits: &FieldLimits) -> Vec<ConfigIssue> {
    let FieldConfig::Text(c) = config else {
        return vec![ConfigIssue::type_mismatch(FieldTypeTag::Text, config.tag())];
    };
    let mut issues = Vec::new();
    check_input_texts(
        &mut issues,
        limits,
        &c.label,
        Some(&c.placeholder),
        &c.helper_text,
    );
    issues
}

fn text_area_rules(config: &FieldConfig, limits: &FieldLimits) -> Vec<ConfigIssue> {
    let FieldConfig::TextArea(c) = config else {
        return vec![ConfigIssue::type_mismatch(
            FieldTypeTag::TextArea,
            config.tag(),
        )];
    };
    let mut issues = Vec::new();
    check_input_texts(
        &mut issues,
        limits,
        &c.label,
        Some(&c.placeholder),
        &c.helper_text,
    );
    if !limits.rows.contains(c.rows as usize) {
        issues.push(ConfigIssue::new(
            "rows",
            format!(
                "must be between {} and {}",
                limits.rows.min, limits.rows.max
            ),
        ));
    }
    issues
}

/// Free text: anything goes, but a required field may not be blank.
fn required_not_blank(config: &FieldConfig, value: &str) -> bool {
    !config.is_required() || !is_blank(value)
}
