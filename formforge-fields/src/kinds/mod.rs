//! Built-in field types.
//!
//! One module per family. Each exposes `definition()` functions returning the
//! [`FieldTypeDefinition`] for its tags; [`builtin_definitions`] lists them in
//! palette order. Adding a field type means adding a tag, a `FieldConfig`
//! variant and one entry here.

mod choice;
mod date;
mod email;
mod layout;
mod number;
mod text;

use crate::definition::FieldTypeDefinition;

pub use choice::{selected_choices, Selection};

/// Every built-in definition, form fields first, then layout fields.
pub fn builtin_definitions() -> Vec<FieldTypeDefinition> {
    vec![
        text::text_definition(),
        email::definition(),
        number::definition(),
        text::text_area_definition(),
        date::definition(),
        choice::checkbox_definition(),
        choice::checkbox_group_definition(),
        choice::select_definition(),
        layout::title_definition(),
        layout::sub_title_definition(),
        layout::paragraph_definition(),
        layout::separator_definition(),
        layout::spacer_definition(),
    ]
}
