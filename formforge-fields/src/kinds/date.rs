//! Calendar date field.

use chrono::{DateTime, NaiveDate};

use crate::configuration::{
    check_input_texts, decode_with_defaults, ConfigIssue, FieldConfig, FieldLimits, TextConfig,
};
use crate::definition::FieldTypeDefinition;
use crate::encoding::is_blank;
use crate::tag::FieldTypeTag;

fn default_date() -> TextConfig {
    TextConfig {
        label: "Date field".into(),
        placeholder: "YYYY-MM-DD".into(),
        helper_text: "Pick a date".into(),
        required: false,
    }
}

pub(super) fn definition() -> FieldTypeDefinition {
    FieldTypeDefinition::new(
        FieldTypeTag::Date,
        "Date Field",
        FieldConfig::Date(default_date()),
        |value| decode_with_defaults(&default_date(), value).map(FieldConfig::Date),
    )
    .with_config_rules(rules)
    .with_value_rule(valid_date)
}

fn rules(config: &FieldConfig, limits: &FieldLimits) -> Vec<ConfigIssue> {
    let FieldConfig::Date(c) = config else {
        return vec![ConfigIssue::type_mismatch(FieldTypeTag::Date, config.tag())];
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

/// `YYYY-MM-DD`, or a full RFC 3339 timestamp as date pickers often send.
fn valid_date(config: &FieldConfig, value: &str) -> bool {
    if is_blank(value) {
        return !config.is_required();
    }
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || DateTime::parse_from_rfc3339(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::FieldId;
    use rstest::rstest;

    #[rstest]
    #[case("2024-02-29", true)]
    #[case("2023-02-29", false)]
    #[case("2024-06-01T10:00:00Z", true)]
    #[case("01/06/2024", false)]
    #[case("", true)]
    fn date_values(#[case] value: &str, #[case] expected: bool) {
        let def = definition();
        let instance = def.construct(FieldId::from("d"));
        assert_eq!(def.validate_value(&instance, value), expected);
    }
}
