//! Table rendering for command output.

use comfy_table::{presets::UTF8_FULL, Table};
use formforge_designer::{ColumnDef, Form, ValidationReport};
use formforge_fields::FieldRegistry;

fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(header);
    table
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// The palette: every field type with its designer label.
pub fn palette(registry: &FieldRegistry) -> Table {
    let mut table = table(vec!["Type", "Label", "Layout"]);
    for definition in registry.palette() {
        table.add_row(vec![
            definition.tag().as_str(),
            definition.designer_label(),
            yes_no(definition.is_layout()),
        ]);
    }
    table
}

pub fn forms<'a>(forms: impl IntoIterator<Item = &'a Form>) -> Table {
    let mut table = table(vec!["Id", "Name", "Status", "Fields", "Created"]);
    for form in forms {
        table.add_row(vec![
            form.id().to_string(),
            form.name().to_string(),
            form.status().to_string(),
            form.document().len().to_string(),
            form.created_at().format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }
    table
}

/// A form's fields in document order.
pub fn fields(form: &Form) -> Table {
    let mut table = table(vec!["#", "Id", "Type", "Label", "Required"]);
    for (index, instance) in form.document().instances().iter().enumerate() {
        table.add_row(vec![
            index.to_string(),
            instance.id().to_string(),
            instance.tag().to_string(),
            instance.label().unwrap_or("").to_string(),
            yes_no(instance.is_required()).to_string(),
        ]);
    }
    table
}

pub fn columns(columns: &[ColumnDef]) -> Table {
    let mut table = table(vec!["Id", "Label", "Type"]);
    for column in columns {
        table.add_row(vec![
            column.id.to_string(),
            column.label.clone(),
            column.field_type.to_string(),
        ]);
    }
    table
}

/// Per-field verdicts, labelled from the form where possible.
pub fn report(form: &Form, report: &ValidationReport) -> Table {
    let mut table = table(vec!["Id", "Label", "Valid"]);
    for (id, valid) in &report.per_field {
        let label = form
            .document()
            .get(id.as_str())
            .and_then(|i| i.label())
            .unwrap_or("");
        table.add_row(vec![id.as_str(), label, yes_no(*valid)]);
    }
    table
}
