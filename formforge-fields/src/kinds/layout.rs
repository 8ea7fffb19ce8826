//! Layout-only fields. They display something but never collect a value.

use crate::configuration::{
    check_length, decode_with_defaults, ConfigIssue, FieldConfig, FieldLimits, HeadingConfig,
    ParagraphConfig, SeparatorConfig, SpacerConfig,
};
use crate::definition::FieldTypeDefinition;
use crate::tag::FieldTypeTag;

fn default_title() -> HeadingConfig {
    HeadingConfig {
        title: "Title field".into(),
    }
}

fn default_sub_title() -> HeadingConfig {
    HeadingConfig {
        title: "Subtitle field".into(),
    }
}

fn default_paragraph() -> ParagraphConfig {
    ParagraphConfig {
        text: "Text here".into(),
    }
}

fn default_spacer() -> SpacerConfig {
    SpacerConfig { height: 20 }
}

pub(super) fn title_definition() -> FieldTypeDefinition {
    FieldTypeDefinition::new(
        FieldTypeTag::Title,
        "Title",
        FieldConfig::Title(default_title()),
        |value| decode_with_defaults(&default_title(), value).map(FieldConfig::Title),
    )
    .layout()
    .with_config_rules(heading_rules)
}

pub(super) fn sub_title_definition() -> FieldTypeDefinition {
    FieldTypeDefinition::new(
        FieldTypeTag::SubTitle,
        "Subtitle",
        FieldConfig::SubTitle(default_sub_title()),
        |value| decode_with_defaults(&default_sub_title(), value).map(FieldConfig::SubTitle),
    )
    .layout()
    .with_config_rules(heading_rules)
}

pub(super) fn paragraph_definition() -> FieldTypeDefinition {
    FieldTypeDefinition::new(
        FieldTypeTag::Paragraph,
        "Paragraph",
        FieldConfig::Paragraph(default_paragraph()),
        |value| decode_with_defaults(&default_paragraph(), value).map(FieldConfig::Paragraph),
    )
    .layout()
    .with_config_rules(paragraph_rules)
}

pub(super) fn separator_definition() -> FieldTypeDefinition {
    FieldTypeDefinition::new(
        FieldTypeTag::Separator,
        "Separator",
        FieldConfig::Separator(SeparatorConfig {}),
        |value| decode_with_defaults(&SeparatorConfig {}, value).map(FieldConfig::Separator),
    )
    .layout()
}

pub(super) fn spacer_definition() -> FieldTypeDefinition {
    FieldTypeDefinition::new(
        FieldTypeTag::Spacer,
        "Spacer",
        FieldConfig::Spacer(default_spacer()),
        |value| decode_with_defaults(&default_spacer(), value).map(FieldConfig::Spacer),
    )
    .layout()
    .with_config_rules(spacer_rules)
}

fn heading_rules(config: &FieldConfig, limits: &FieldLimits) -> Vec<ConfigIssue> {
    match config {
        FieldConfig::Title(c) | FieldConfig::SubTitle(c) => {
            let mut issues = Vec::new();
            check_length(&mut issues, "title", &c.title, limits.title);
            issues
        }
        other => vec![ConfigIssue::type_mismatch(FieldTypeTag::Title, other.tag())],
    }
}

fn paragraph_rules(config: &FieldConfig, limits: &FieldLimits) -> Vec<ConfigIssue> {
    let FieldConfig::Paragraph(c) = config else {
        return vec![ConfigIssue::type_mismatch(
            FieldTypeTag::Paragraph,
            config.tag(),
        )];
    };
    let mut issues = Vec::new();
    check_length(&mut issues, "text", &c.text, limits.paragraph);
    issues
}

fn spacer_rules(config: &FieldConfig, limits: &FieldLimits) -> Vec<ConfigIssue> {
    let FieldConfig::Spacer(c) = config else {
        return vec![ConfigIssue::type_mismatch(FieldTypeTag::Spacer, config.tag())];
    };
    if limits.spacer_height.contains(c.height as usize) {
        Vec::new()
    } else {
        vec![ConfigIssue::new(
            "height",
            format!(
                "must be between {} and {}",
                limits.spacer_height.min, limits.spacer_height.max
            ),
        )]
    }
}
