//! Field registry: maps every tag to its definition.
//!
//! The registry is built once, before any document operation runs, and is
//! read-only afterwards. It must cover every tag that can appear in persisted
//! data; [`FieldRegistry::with_limits`] registers all built-in types.

use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, warn};

use crate::configuration::{FieldConfig, FieldLimits};
use crate::definition::{ConfigurationValidator, FieldTypeDefinition};
use crate::error::{FieldsError, Result};
use crate::instance::{FieldId, FieldInstance, FieldRecord};
use crate::kinds::builtin_definitions;
use crate::tag::FieldTypeTag;

static GLOBAL: OnceLock<Arc<FieldRegistry>> = OnceLock::new();

/// Registry of field type definitions, in palette order.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    definitions: IndexMap<FieldTypeTag, FieldTypeDefinition>,
    limits: FieldLimits,
}

impl FieldRegistry {
    /// All built-in types under default limits.
    pub fn builtin() -> Self {
        Self::with_limits(FieldLimits::default())
    }

    /// All built-in types under the given limits.
    pub fn with_limits(limits: FieldLimits) -> Self {
        let mut definitions = IndexMap::new();
        for def in builtin_definitions() {
            let previous = definitions.insert(def.tag(), def);
            debug_assert!(previous.is_none(), "field type registered twice");
        }
        debug!(types = definitions.len(), "field registry built");
        Self {
            definitions,
            limits,
        }
    }

    /// The process-wide registry, built with default limits unless
    /// [`FieldRegistry::init_global`] ran first.
    pub fn global() -> Arc<FieldRegistry> {
        GLOBAL
            .get_or_init(|| Arc::new(FieldRegistry::builtin()))
            .clone()
    }

    /// Initialize the process-wide registry. Only the first call has effect;
    /// later calls return the registry already in place and warn if it was
    /// built with different limits.
    pub fn init_global(limits: FieldLimits) -> Arc<FieldRegistry> {
        install(&GLOBAL, limits)
    }

    pub fn limits(&self) -> &FieldLimits {
        &self.limits
    }

    /// Resolve a tag to its definition.
    pub fn resolve(&self, tag: FieldTypeTag) -> Result<&FieldTypeDefinition> {
        self.definitions
            .get(&tag)
            .ok_or_else(|| FieldsError::UnknownFieldType {
                tag: tag.to_string(),
            })
    }

    /// Resolve a persisted tag name to its definition.
    pub fn resolve_name(&self, name: &str) -> Result<&FieldTypeDefinition> {
        self.resolve(name.parse()?)
    }

    /// Whether the tag is registered.
    pub fn contains(&self, tag: FieldTypeTag) -> bool {
        self.definitions.contains_key(&tag)
    }

    /// Whether `tag` is a display-only field. Unregistered tags are not.
    pub fn is_layout(&self, tag: FieldTypeTag) -> bool {
        self.definitions.get(&tag).is_some_and(|d| d.is_layout())
    }

    /// Definitions in palette order: input fields first, then layout fields.
    pub fn palette(&self) -> impl Iterator<Item = &FieldTypeDefinition> {
        let (inputs, layout): (Vec<_>, Vec<_>) =
            self.definitions.values().partition(|d| !d.is_layout());
        inputs.into_iter().chain(layout)
    }

    /// New instance of `tag` holding a fresh copy of its default configuration.
    pub fn construct(&self, tag: FieldTypeTag, id: FieldId) -> Result<FieldInstance> {
        Ok(self.resolve(tag)?.construct(id))
    }

    /// The configuration validator for `tag` under this registry's limits.
    pub fn configuration_validator(&self, tag: FieldTypeTag) -> Result<ConfigurationValidator<'_>> {
        Ok(self.resolve(tag)?.configuration_validator(&self.limits))
    }

    /// Check a configuration against its own type's rules.
    pub fn validate_configuration(&self, config: &FieldConfig) -> Result<()> {
        self.configuration_validator(config.tag())?.validate(config)
    }

    /// A copy of `instance` carrying `config`, provided the configuration
    /// belongs to the instance's type and passes its validator.
    pub fn reconfigure(
        &self,
        instance: &FieldInstance,
        config: FieldConfig,
    ) -> Result<FieldInstance> {
        self.configuration_validator(instance.tag())?.validate(&config)?;
        let mut updated = instance.clone();
        updated.set_configuration(config);
        Ok(updated)
    }

    /// Decode a persisted configuration for `tag`, defaulting missing attributes.
    pub fn decode_configuration(&self, tag: FieldTypeTag, value: Value) -> Result<FieldConfig> {
        self.resolve(tag)?.decode_configuration(value)
    }

    /// Rebuild an instance from its persisted record: resolve the tag, decode
    /// the configuration and validate it.
    pub fn instantiate(&self, record: FieldRecord) -> Result<FieldInstance> {
        let definition = self.resolve_name(&record.type_)?;
        let configuration = definition.decode_configuration(record.configuration)?;
        definition
            .configuration_validator(&self.limits)
            .validate(&configuration)?;
        Ok(FieldInstance {
            id: record.id,
            configuration,
        })
    }

    /// Fail unless every default template passes its validator under this
    /// registry's limits.
    pub fn check_defaults(&self) -> Result<()> {
        for definition in self.definitions.values() {
            definition
                .configuration_validator(&self.limits)
                .validate(definition.default_configuration())?;
        }
        Ok(())
    }

    /// Check a submitted value against the instance's value rule.
    pub fn validate_value(&self, instance: &FieldInstance, value: &str) -> Result<bool> {
        Ok(self.resolve(instance.tag())?.validate_value(instance, value))
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn install(cell: &OnceLock<Arc<FieldRegistry>>, limits: FieldLimits) -> Arc<FieldRegistry> {
    let mut requested = Some(limits);
    let registry = cell
        .get_or_init(|| {
            let limits = requested.take().unwrap_or_default();
            Arc::new(FieldRegistry::with_limits(limits))
        })
        .clone();
    if let Some(limits) = requested {
        if limits != registry.limits {
            warn!("field registry already initialized; ignoring new limits");
        }
    }
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::{ChoiceConfig, TextConfig};
    use serde_json::json;

    #[test]
    fn registry_covers_every_tag() {
        let registry = FieldRegistry::builtin();
        for tag in FieldTypeTag::ALL {
            assert!(registry.contains(tag), "{tag} missing");
            assert_eq!(registry.resolve(tag).unwrap().tag(), tag);
        }
    }

    #[test]
    fn defaults_pass_their_own_validator() {
        let registry = FieldRegistry::builtin();
        for tag in FieldTypeTag::ALL {
            let instance = registry.construct(tag, FieldId::new()).unwrap();
            registry
                .validate_configuration(instance.configuration())
                .unwrap_or_else(|e| panic!("{tag} default rejected: {e}"));
        }
    }

    #[test]
    fn constructed_configs_do_not_alias() {
        let registry = FieldRegistry::builtin();
        let a = registry
            .construct(FieldTypeTag::Select, FieldId::from("a"))
            .unwrap();
        let mut config = a.configuration().clone();
        if let FieldConfig::Select(c) = &mut config {
            c.options.push("Option 3".into());
        }
        let a = registry.reconfigure(&a, config).unwrap();
        let b = registry
            .construct(FieldTypeTag::Select, FieldId::from("b"))
            .unwrap();
        assert_eq!(a.configuration().options().unwrap().len(), 3);
        assert_eq!(b.configuration().options().unwrap().len(), 2);
        assert_eq!(
            registry
                .resolve(FieldTypeTag::Select)
                .unwrap()
                .default_configuration()
                .options()
                .unwrap()
                .len(),
            2
        );
    }

    #[test]
    fn global_registry_is_shared() {
        let a = FieldRegistry::global();
        let b = FieldRegistry::global();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(a.is_layout(FieldTypeTag::Spacer));
        assert!(!a.is_layout(FieldTypeTag::Email));
    }

    #[test]
    fn resolve_name_unknown_fails() {
        let registry = FieldRegistry::builtin();
        let err = registry.resolve_name("SignatureField").unwrap_err();
        assert!(matches!(err, FieldsError::UnknownFieldType { .. }));
    }

    #[test]
    fn palette_lists_inputs_before_layout() {
        let registry = FieldRegistry::builtin();
        let layout_flags: Vec<bool> = registry.palette().map(|d| d.is_layout()).collect();
        let first_layout = layout_flags.iter().position(|l| *l).unwrap();
        assert!(layout_flags[first_layout..].iter().all(|l| *l));
        assert_eq!(layout_flags.len(), FieldTypeTag::ALL.len());
    }

    #[test]
    fn reconfigure_rejects_other_type() {
        let registry = FieldRegistry::builtin();
        let text = registry
            .construct(FieldTypeTag::Text, FieldId::from("t"))
            .unwrap();
        let email = FieldConfig::Email(TextConfig {
            label: "Email".into(),
            placeholder: String::new(),
            helper_text: String::new(),
            required: true,
        });
        let err = registry.reconfigure(&text, email).unwrap_err();
        assert_eq!(err.issues()[0].attribute, "type");
    }

    #[test]
    fn instantiate_fills_missing_attributes() {
        let registry = FieldRegistry::builtin();
        let record = FieldRecord {
            id: "c1".into(),
            type_: "CheckboxGroupField".into(),
            configuration: json!({"label": "Colors", "options": ["Red", "Blue"]}),
        };
        let instance = registry.instantiate(record).unwrap();
        assert_eq!(
            instance.configuration(),
            &FieldConfig::CheckboxGroup(ChoiceConfig {
                label: "Colors".into(),
                helper_text: "Helper text".into(),
                required: false,
                options: vec!["Red".into(), "Blue".into()],
            })
        );
    }

    #[test]
    fn instantiate_rejects_invalid_configuration() {
        let registry = FieldRegistry::builtin();
        let record = FieldRecord {
            id: "s1".into(),
            type_: "SelectField".into(),
            configuration: json!({"options": []}),
        };
        let err = registry.instantiate(record).unwrap_err();
        assert!(matches!(err, FieldsError::InvalidConfiguration { .. }));
    }

    #[test]
    fn instantiate_rejects_undecodable_configuration() {
        let registry = FieldRegistry::builtin();
        let record = FieldRecord {
            id: "n1".into(),
            type_: "NumberField".into(),
            configuration: json!({"min": "zero"}),
        };
        let err = registry.instantiate(record).unwrap_err();
        assert!(matches!(err, FieldsError::ConfigurationDecode { .. }));
    }

    #[test]
    fn custom_limits_apply() {
        let limits = FieldLimits {
            label: crate::configuration::Bounds::new(1, 5),
            ..FieldLimits::default()
        };
        let registry = FieldRegistry::with_limits(limits);
        let text = registry
            .construct(FieldTypeTag::Text, FieldId::from("t"))
            .unwrap();
        // "Text field" is 10 characters, over the custom maximum.
        assert!(registry
            .validate_configuration(text.configuration())
            .is_err());
        assert!(registry.check_defaults().is_err());
        assert!(FieldRegistry::builtin().check_defaults().is_ok());
    }

    #[test]
    fn later_install_keeps_first_limits() {
        let cell = OnceLock::new();
        let wide = FieldLimits {
            options_max: 80,
            ..FieldLimits::default()
        };
        let first = install(&cell, wide.clone());
        let second = install(&cell, FieldLimits::default());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.limits(), &wide);
    }
}
