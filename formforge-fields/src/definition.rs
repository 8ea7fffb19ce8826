//! Field type definitions: the capability bundle behind each tag.

use serde_json::Value;

use crate::configuration::{ConfigIssue, FieldConfig, FieldLimits};
use crate::error::{FieldsError, Result};
use crate::instance::{FieldId, FieldInstance};
use crate::tag::FieldTypeTag;

type ConfigRules = fn(&FieldConfig, &FieldLimits) -> Vec<ConfigIssue>;
type ValueRule = fn(&FieldConfig, &str) -> bool;
type Decoder = fn(Value) -> serde_json::Result<FieldConfig>;

/// Everything the engine knows about one field type.
///
/// A definition is pure data plus three pure functions: its default
/// configuration template, its configuration rules and its value rule.
#[derive(Debug, Clone)]
pub struct FieldTypeDefinition {
    tag: FieldTypeTag,
    designer_label: &'static str,
    layout: bool,
    default_configuration: FieldConfig,
    config_rules: ConfigRules,
    value_rule: ValueRule,
    decoder: Decoder,
}

fn no_config_rules(_: &FieldConfig, _: &FieldLimits) -> Vec<ConfigIssue> {
    Vec::new()
}

fn always_valid(_: &FieldConfig, _: &str) -> bool {
    true
}

impl FieldTypeDefinition {
    /// A definition with no configuration rules whose values are always valid.
    pub fn new(
        tag: FieldTypeTag,
        designer_label: &'static str,
        default_configuration: FieldConfig,
        decoder: Decoder,
    ) -> Self {
        debug_assert_eq!(default_configuration.tag(), tag);
        Self {
            tag,
            designer_label,
            layout: false,
            default_configuration,
            config_rules: no_config_rules,
            value_rule: always_valid,
            decoder,
        }
    }

    /// Mark as display-only: no value is collected, values always validate.
    pub fn layout(mut self) -> Self {
        self.layout = true;
        self.value_rule = always_valid;
        self
    }

    pub fn with_config_rules(mut self, rules: ConfigRules) -> Self {
        self.config_rules = rules;
        self
    }

    pub fn with_value_rule(mut self, rule: ValueRule) -> Self {
        if !self.layout {
            self.value_rule = rule;
        }
        self
    }

    pub fn tag(&self) -> FieldTypeTag {
        self.tag
    }

    /// Name shown on the designer palette.
    pub fn designer_label(&self) -> &'static str {
        self.designer_label
    }

    pub fn is_layout(&self) -> bool {
        self.layout
    }

    /// The immutable default template.
    pub fn default_configuration(&self) -> &FieldConfig {
        &self.default_configuration
    }

    /// New instance with its own copy of the default configuration.
    pub fn construct(&self, id: FieldId) -> FieldInstance {
        FieldInstance {
            id,
            configuration: self.default_configuration.clone(),
        }
    }

    /// The validator for configurations of this type under `limits`.
    pub fn configuration_validator<'a>(
        &'a self,
        limits: &'a FieldLimits,
    ) -> ConfigurationValidator<'a> {
        ConfigurationValidator {
            definition: self,
            limits,
        }
    }

    /// Whether `value` is acceptable for `instance`.
    ///
    /// An instance of another type never validates against this definition.
    pub fn validate_value(&self, instance: &FieldInstance, value: &str) -> bool {
        if instance.tag() != self.tag {
            return false;
        }
        (self.value_rule)(&instance.configuration, value)
    }

    /// Decode a persisted configuration, filling missing attributes from the
    /// default template.
    pub fn decode_configuration(&self, value: Value) -> Result<FieldConfig> {
        (self.decoder)(value).map_err(|source| FieldsError::ConfigurationDecode {
            tag: self.tag,
            source,
        })
    }
}

/// Accepts or rejects proposed configurations for one field type.
#[derive(Debug, Clone, Copy)]
pub struct ConfigurationValidator<'a> {
    definition: &'a FieldTypeDefinition,
    limits: &'a FieldLimits,
}

impl ConfigurationValidator<'_> {
    /// Every rule the configuration violates, empty when it is acceptable.
    pub fn issues(&self, config: &FieldConfig) -> Vec<ConfigIssue> {
        if config.tag() != self.definition.tag {
            return vec![ConfigIssue::type_mismatch(
                self.definition.tag,
                config.tag(),
            )];
        }
        (self.definition.config_rules)(config, self.limits)
    }

    pub fn accepts(&self, config: &FieldConfig) -> bool {
        self.issues(config).is_empty()
    }

    pub fn validate(&self, config: &FieldConfig) -> Result<()> {
        let issues = self.issues(config);
        if issues.is_empty() {
            Ok(())
        } else {
            Err(FieldsError::invalid_configuration(
                self.definition.tag,
                issues,
            ))
        }
    }
}
