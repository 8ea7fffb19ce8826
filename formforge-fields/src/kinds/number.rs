//! Numeric field with optional inclusive bounds.

use crate::configuration::{
    check_input_texts, decode_with_defaults, ConfigIssue, FieldConfig, FieldLimits, NumberConfig,
};
use crate::definition::FieldTypeDefinition;
use crate::encoding::is_blank;
use crate::tag::FieldTypeTag;

fn default_number() -> NumberConfig {
    NumberConfig {
        label: "Number field".into(),
        placeholder: "0".into(),
        helper_text: "Helper text".into(),
        required: false,
        min: None,
        max: None,
    }
}

pub(super) fn definition() -> FieldTypeDefinition {
    FieldTypeDefinition::new(
        FieldTypeTag::Number,
        "Number Field",
        FieldConfig::Number(default_number()),
        |value| decode_with_defaults(&default_number(), value).map(FieldConfig::Number),
    )
    .with_config_rules(rules)
    .with_value_rule(valid_number)
}

fn rules(config: &FieldConfig, limits: &FieldLimits) -> Vec<ConfigIssue> {
    let FieldConfig::Number(c) = config else {
        return vec![ConfigIssue::type_mismatch(FieldTypeTag::Number, config.tag())];
    };
    let mut issues = Vec::new();
    check_input_texts(
        &mut issues,
        limits,
        &c.label,
        Some(&c.placeholder),
        &c.helper_text,
    );
    for (attribute, bound) in [("min", c.min), ("max", c.max)] {
        if bound.is_some_and(|b| !b.is_finite()) {
            issues.push(ConfigIssue::new(attribute, "must be a finite number"));
        }
    }
    if let (Some(min), Some(max)) = (c.min, c.max) {
        if min > max {
            issues.push(ConfigIssue::new("min", "must not exceed max"));
        }
    }
    issues
}

fn valid_number(config: &FieldConfig, value: &str) -> bool {
    let FieldConfig::Number(c) = config else {
        return false;
    };
    if is_blank(value) {
        return !c.required;
    }
    let Ok(n) = value.trim().parse::<f64>() else {
        return false;
    };
    n.is_finite() && c.min.is_none_or(|min| n >= min) && c.max.is_none_or(|max| n <= max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::FieldId;
    use rstest::rstest;

    fn bounded() -> FieldConfig {
        FieldConfig::Number(NumberConfig {
            min: Some(0.0),
            max: Some(10.0),
            ..default_number()
        })
    }

    #[rstest]
    #[case("", true)]
    #[case("0", true)]
    #[case("10", true)]
    #[case(" 4.5 ", true)]
    #[case("-1", false)]
    #[case("10.01", false)]
    #[case("ten", false)]
    #[case("NaN", false)]
    #[case("inf", false)]
    fn bounded_number_values(#[case] value: &str, #[case] expected: bool) {
        let def = definition();
        let mut instance = def.construct(FieldId::from("n"));
        instance.set_configuration(bounded());
        assert_eq!(def.validate_value(&instance, value), expected);
    }

    #[test]
    fn min_above_max_rejected() {
        let def = definition();
        let limits = FieldLimits::default();
        let config = FieldConfig::Number(NumberConfig {
            min: Some(5.0),
            max: Some(1.0),
            ..default_number()
        });
        let issues = def.configuration_validator(&limits).issues(&config);
        assert_eq!(issues, vec![ConfigIssue::new("min", "must not exceed max")]);
    }

    #[test]
    fn non_finite_bound_rejected() {
        let def = definition();
        let limits = FieldLimits::default();
        let config = FieldConfig::Number(NumberConfig {
            max: Some(f64::INFINITY),
            ..default_number()
        });
        assert!(!def.configuration_validator(&limits).accepts(&config));
    }
}
