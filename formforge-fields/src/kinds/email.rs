//! Email address field.

use std::sync::LazyLock;

use regex::Regex;

use crate::configuration::{
    check_input_texts, decode_with_defaults, ConfigIssue, FieldConfig, FieldLimits, TextConfig,
};
use crate::definition::FieldTypeDefinition;
use crate::encoding::is_blank;
use crate::tag::FieldTypeTag;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email pattern"));

fn default_email() -> TextConfig {
    TextConfig {
        label: "Email".into(),
        placeholder: "name@example.com".into(),
        helper_text: "Helper text".into(),
        required: false,
    }
}

pub(super) fn definition() -> FieldTypeDefinition {
    FieldTypeDefinition::new(
        FieldTypeTag::Email,
        "Email Field",
        FieldConfig::Email(default_email()),
        |value| decode_with_defaults(&default_email(), value).map(FieldConfig::Email),
    )
    .with_config_rules(rules)
    .with_value_rule(valid_email)
}

fn rules(config: &FieldConfig, limits: &FieldLimits) -> Vec<ConfigIssue> {
    let FieldConfig::Email(c) = config else {
        return vec![ConfigIssue::type_mismatch(FieldTypeTag::Email, config.tag())];
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

fn valid_email(config: &FieldConfig, value: &str) -> bool {
    if is_blank(value) {
        return !config.is_required();
    }
    EMAIL.is_match(value.trim())
}
