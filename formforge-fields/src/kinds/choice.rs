//! Choice fields: checkbox, checkbox group and select.
//!
//! A checkbox without options is a single boolean box submitted as
//! `"true"`/`"false"`. With options, checkbox and checkbox group values are
//! delimiter-joined option lists. A select value is exactly one option.

use std::collections::HashSet;

use crate::configuration::{
    check_input_texts, decode_with_defaults, ChoiceConfig, ConfigIssue, FieldConfig, FieldLimits,
};
use crate::definition::FieldTypeDefinition;
use crate::encoding::{decode_bool, decode_choices, is_blank, CHOICE_DELIMITER};
use crate::tag::FieldTypeTag;

fn default_checkbox() -> ChoiceConfig {
    ChoiceConfig {
        label: "Checkbox field".into(),
        helper_text: "Helper text".into(),
        required: false,
        options: Vec::new(),
    }
}

fn default_options() -> Vec<String> {
    vec!["Option 1".into(), "Option 2".into()]
}

fn default_checkbox_group() -> ChoiceConfig {
    ChoiceConfig {
        label: "Checkbox group".into(),
        helper_text: "Helper text".into(),
        required: false,
        options: default_options(),
    }
}

fn default_select() -> ChoiceConfig {
    ChoiceConfig {
        label: "Select field".into(),
        helper_text: "Helper text".into(),
        required: false,
        options: default_options(),
    }
}

pub(super) fn checkbox_definition() -> FieldTypeDefinition {
    FieldTypeDefinition::new(
        FieldTypeTag::Checkbox,
        "Checkbox",
        FieldConfig::Checkbox(default_checkbox()),
        |value| decode_with_defaults(&default_checkbox(), value).map(FieldConfig::Checkbox),
    )
    .with_config_rules(checkbox_rules)
    .with_value_rule(valid_choice)
}

pub(super) fn checkbox_group_definition() -> FieldTypeDefinition {
    FieldTypeDefinition::new(
        FieldTypeTag::CheckboxGroup,
        "Checkbox Group",
        FieldConfig::CheckboxGroup(default_checkbox_group()),
        |value| {
            decode_with_defaults(&default_checkbox_group(), value).map(FieldConfig::CheckboxGroup)
        },
    )
    .with_config_rules(checkbox_group_rules)
    .with_value_rule(valid_choice)
}

pub(super) fn select_definition() -> FieldTypeDefinition {
    FieldTypeDefinition::new(
        FieldTypeTag::Select,
        "Select Field",
        FieldConfig::Select(default_select()),
        |value| decode_with_defaults(&default_select(), value).map(FieldConfig::Select),
    )
    .with_config_rules(select_rules)
    .with_value_rule(valid_choice)
}

fn checkbox_rules(config: &FieldConfig, limits: &FieldLimits) -> Vec<ConfigIssue> {
    match config {
        FieldConfig::Checkbox(c) => choice_rules(c, limits, false),
        other => vec![ConfigIssue::type_mismatch(FieldTypeTag::Checkbox, other.tag())],
    }
}

fn checkbox_group_rules(config: &FieldConfig, limits: &FieldLimits) -> Vec<ConfigIssue> {
    match config {
        FieldConfig::CheckboxGroup(c) => choice_rules(c, limits, true),
        other => vec![ConfigIssue::type_mismatch(
            FieldTypeTag::CheckboxGroup,
            other.tag(),
        )],
    }
}

fn select_rules(config: &FieldConfig, limits: &FieldLimits) -> Vec<ConfigIssue> {
    match config {
        FieldConfig::Select(c) => choice_rules(c, limits, true),
        other => vec![ConfigIssue::type_mismatch(FieldTypeTag::Select, other.tag())],
    }
}

fn choice_rules(c: &ChoiceConfig, limits: &FieldLimits, needs_options: bool) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();
    check_input_texts(&mut issues, limits, &c.label, None, &c.helper_text);

    if needs_options && c.options.is_empty() {
        issues.push(ConfigIssue::new("options", "must not be empty"));
    }
    if c.options.len() > limits.options_max {
        issues.push(ConfigIssue::new(
            "options",
            format!("must have at most {} entries", limits.options_max),
        ));
    }

    let mut seen = HashSet::new();
    for (i, option) in c.options.iter().enumerate() {
        let attribute = format!("options[{i}]");
        if is_blank(option) {
            issues.push(ConfigIssue::new(attribute, "must not be blank"));
        } else if option.trim() != option {
            issues.push(ConfigIssue::new(
                attribute,
                "must not start or end with whitespace",
            ));
        } else if option.contains(CHOICE_DELIMITER) {
            issues.push(ConfigIssue::new(
                attribute,
                format!("must not contain '{CHOICE_DELIMITER}'"),
            ));
        } else if !seen.insert(option.as_str()) {
            issues.push(ConfigIssue::new(attribute, "duplicates an earlier option"));
        }
    }
    issues
}

/// What a submitted choice value selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<'a> {
    /// Nothing selected
    Empty,
    /// A checkbox without options was ticked
    Checked,
    /// One or more options, in submitted order
    Options(Vec<&'a str>),
}

impl Selection<'_> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::Empty)
    }
}

/// Decode a submitted value against a choice configuration.
///
/// `None` when the value is not a valid selection for the configuration, or
/// the configuration is not a choice field.
pub fn selected_choices<'a>(config: &FieldConfig, value: &'a str) -> Option<Selection<'a>> {
    match config {
        FieldConfig::Checkbox(c) if c.options.is_empty() => {
            if is_blank(value) {
                return Some(Selection::Empty);
            }
            match decode_bool(value)? {
                true => Some(Selection::Checked),
                false => Some(Selection::Empty),
            }
        }
        FieldConfig::Checkbox(c) | FieldConfig::CheckboxGroup(c) => {
            let entries = decode_choices(value);
            if entries.is_empty() {
                return Some(Selection::Empty);
            }
            let mut seen = HashSet::new();
            let all_known = entries
                .iter()
                .all(|e| c.options.iter().any(|o| o == *e) && seen.insert(*e));
            all_known.then_some(Selection::Options(entries))
        }
        FieldConfig::Select(c) => {
            if is_blank(value) {
                return Some(Selection::Empty);
            }
            let value = value.trim();
            c.options
                .iter()
                .any(|o| o == value)
                .then(|| Selection::Options(vec![value]))
        }
        _ => None,
    }
}

fn valid_choice(config: &FieldConfig, value: &str) -> bool {
    match selected_choices(config, value) {
        Some(selection) => !config.is_required() || !selection.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::{FieldId, FieldInstance};
    use rstest::rstest;

    fn instance(def: &FieldTypeDefinition, config: FieldConfig) -> FieldInstance {
        let mut instance = def.construct(FieldId::from("c"));
        instance.set_configuration(config);
        instance
    }

    fn required_checkbox(options: &[&str]) -> FieldConfig {
        FieldConfig::Checkbox(ChoiceConfig {
            required: true,
            options: options.iter().map(|o| o.to_string()).collect(),
            ..default_checkbox()
        })
    }

    #[rstest]
    #[case("", false)]
    #[case("false", false)]
    #[case("true", true)]
    #[case("yes", false)]
    fn bare_required_checkbox(#[case] value: &str, #[case] expected: bool) {
        let def = checkbox_definition();
        let instance = instance(&def, required_checkbox(&[]));
        assert_eq!(def.validate_value(&instance, value), expected);
    }

    #[rstest]
    #[case("", false)]
    #[case("Option 1", true)]
    #[case("Option 1,Option 2", true)]
    #[case("Option 3", false)]
    #[case("Option 1,Option 1", false)]
    #[case("true", false)]
    fn required_checkbox_with_options(#[case] value: &str, #[case] expected: bool) {
        let def = checkbox_definition();
        let instance = instance(&def, required_checkbox(&["Option 1", "Option 2"]));
        assert_eq!(def.validate_value(&instance, value), expected);
    }

    #[test]
    fn optional_checkbox_group_accepts_empty_but_not_unknown() {
        let def = checkbox_group_definition();
        let instance = def.construct(FieldId::from("g"));
        assert!(def.validate_value(&instance, ""));
        assert!(def.validate_value(&instance, "Option 2, Option 1"));
        assert!(!def.validate_value(&instance, "Option 9"));
    }

    #[test]
    fn select_takes_exactly_one_option() {
        let def = select_definition();
        let mut config = default_select();
        config.required = true;
        let instance = instance(&def, FieldConfig::Select(config));
        assert!(def.validate_value(&instance, "Option 1"));
        assert!(!def.validate_value(&instance, "Option 1,Option 2"));
        assert!(!def.validate_value(&instance, ""));
    }

    #[test]
    fn selection_reports_choices_in_order() {
        let config = FieldConfig::CheckboxGroup(default_checkbox_group());
        assert_eq!(
            selected_choices(&config, "Option 2,Option 1"),
            Some(Selection::Options(vec!["Option 2", "Option 1"]))
        );
        assert_eq!(selected_choices(&config, ""), Some(Selection::Empty));
    }

    #[test]
    fn selection_of_non_choice_is_none() {
        let config = FieldConfig::Separator(Default::default());
        assert_eq!(selected_choices(&config, "x"), None);
    }

    #[test]
    fn group_and_select_need_options() {
        let limits = FieldLimits::default();
        for def in [checkbox_group_definition(), select_definition()] {
            let mut config = def.default_configuration().clone();
            if let FieldConfig::CheckboxGroup(c) | FieldConfig::Select(c) = &mut config {
                c.options.clear();
            }
            let issues = def.configuration_validator(&limits).issues(&config);
            assert_eq!(issues, vec![ConfigIssue::new("options", "must not be empty")]);
        }
    }

    #[test]
    fn bare_checkbox_needs_no_options() {
        let limits = FieldLimits::default();
        let def = checkbox_definition();
        assert!(def
            .configuration_validator(&limits)
            .accepts(def.default_configuration()));
    }

    #[test]
    fn option_rules_reported_per_entry() {
        let limits = FieldLimits::default();
        let def = checkbox_group_definition();
        let config = FieldConfig::CheckboxGroup(ChoiceConfig {
            options: vec![
                "Red".into(),
                " ".into(),
                "Red".into(),
                "Red,Blue".into(),
                " Green".into(),
            ],
            ..default_checkbox_group()
        });
        let attributes: Vec<_> = def
            .configuration_validator(&limits)
            .issues(&config)
            .into_iter()
            .map(|i| i.attribute)
            .collect();
        assert_eq!(
            attributes,
            vec!["options[1]", "options[2]", "options[3]", "options[4]"]
        );
    }

    #[test]
    fn too_many_options_rejected() {
        let limits = FieldLimits {
            options_max: 2,
            ..FieldLimits::default()
        };
        let def = select_definition();
        let config = FieldConfig::Select(ChoiceConfig {
            options: vec!["a".into(), "b".into(), "c".into()],
            ..default_select()
        });
        assert!(!def.configuration_validator(&limits).accepts(&config));
    }
}
