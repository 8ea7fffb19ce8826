//! Field type registry and field instances
//!
//! `formforge-fields` owns the closed palette of field types a form can be
//! assembled from. It knows nothing about documents, forms or storage.
//! Consumers place [`FieldInstance`]s into their own structures and come back
//! here to construct, check and validate them.
//!
//! # Architecture
//!
//! - **Closed tag set**: [`FieldTypeTag`] names every field type; [`FieldConfig`]
//!   carries one configuration shape per tag
//! - **Capability bundles**: each tag maps to a [`FieldTypeDefinition`] holding
//!   its default template, configuration rules and value rule
//! - **Static registry**: [`FieldRegistry`] is built once and never mutated
//! - **String-encoded values**: submitted values are strings; choice lists are
//!   joined with [`encoding::CHOICE_DELIMITER`]

pub mod configuration;
pub mod definition;
pub mod encoding;
pub mod error;
pub mod instance;
pub mod kinds;
pub mod registry;
pub mod tag;

pub use configuration::{
    Bounds, ChoiceConfig, ConfigIssue, FieldConfig, FieldLimits, HeadingConfig, NumberConfig,
    ParagraphConfig, SeparatorConfig, SpacerConfig, TextAreaConfig, TextConfig,
};
pub use definition::{ConfigurationValidator, FieldTypeDefinition};
pub use error::{FieldsError, Result};
pub use encoding::ValueEncoding;
pub use instance::{FieldId, FieldInstance, FieldRecord};
pub use kinds::{selected_choices, Selection};
pub use registry::FieldRegistry;
pub use tag::FieldTypeTag;
