//! Command handlers.
//!
//! Each handler works against an open [`FormStore`] and writes its output to
//! the given writer. Edits are persisted before the handler returns.

use std::io::{Read, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use formforge_designer::{
    checked_index, DesignerDocument, Form, FormStore, SchemaPayload, SubmissionValues,
};
use formforge_fields::FieldRegistry;
use serde_json::Value;
use tracing::debug;

use crate::cli::{Commands, OutputFormat};
use crate::render;

/// How a command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// A submission was validated and rejected
    Rejected,
}

/// Run one command.
pub async fn run(
    command: Commands,
    store: &mut FormStore,
    out: &mut impl Write,
) -> Result<Outcome> {
    match command {
        Commands::Types { json } => types(store.registry(), json, out)?,
        Commands::New { name, description } => {
            let mut form = store.new_form(name);
            if let Some(description) = description {
                form = form.with_description(description);
            }
            store.write_form(&form).await?;
            writeln!(out, "{}", form.id())?;
        }
        Commands::List => {
            if store.is_empty() {
                writeln!(out, "No forms found.")?;
            } else {
                writeln!(out, "{}", render::forms(store.all_forms()))?;
            }
        }
        Commands::Show { form, json } => {
            let form = store.find_form(&form)?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(form.document().instances())?)?;
            } else {
                writeln!(out, "{} ({})", form.name(), form.status())?;
                writeln!(out, "{}", render::fields(form))?;
            }
        }
        Commands::Add {
            form,
            field_type,
            at,
        } => {
            let mut form = store.find_form(&form)?.clone();
            let at = at
                .map(|i| checked_index(i, form.document().len()))
                .transpose()?;
            let id = form.edit_returning(|d| d.insert(field_type, at))?;
            store.write_form(&form).await?;
            writeln!(out, "{id}")?;
        }
        Commands::Move { form, field, index } => {
            edit(store, &form, |d| d.move_to(&field, checked_index(index, d.len())?)).await?;
        }
        Commands::Remove { form, field } => {
            edit(store, &form, |d| d.remove_by_id(&field)).await?;
        }
        Commands::Duplicate { form, field } => {
            let mut form = store.find_form(&form)?.clone();
            let id = form.edit_returning(|d| d.duplicate(&field))?;
            store.write_form(&form).await?;
            writeln!(out, "{id}")?;
        }
        Commands::Configure {
            form,
            field,
            changes,
        } => configure(store, &form, &field, &changes).await?,
        Commands::Publish { form } => {
            let mut form = store.find_form(&form)?.clone();
            let schema = form.publish()?;
            store.write_form(&form).await?;
            writeln!(
                out,
                "Published '{}' with {} input fields",
                form.name(),
                schema.columns().len()
            )?;
        }
        Commands::Archive { form } => {
            let mut form = store.find_form(&form)?.clone();
            form.archive()?;
            store.write_form(&form).await?;
        }
        Commands::Delete { form } => {
            let id = store.find_form(&form)?.id();
            store.delete_form(&id).await?;
        }
        Commands::Export { form, format } => {
            let payload = store.find_form(&form)?.document().serialize()?;
            let text = match format {
                OutputFormat::Json => payload.to_json()?,
                OutputFormat::Yaml => payload.to_yaml()?,
            };
            writeln!(out, "{}", text.trim_end())?;
        }
        Commands::Import { path, name } => {
            let document = load_document(&path, Arc::clone(store.registry()))?;
            let mut form = store.new_form(name);
            form.edit(move |_| Ok(document))?;
            store.write_form(&form).await?;
            writeln!(out, "{}", form.id())?;
        }
        Commands::Check { path } => {
            let document = load_document(&path, Arc::clone(store.registry()))?;
            writeln!(out, "{}: {} fields OK", path.display(), document.len())?;
        }
        Commands::Validate { form, values } => {
            let form = store.find_form(&form)?;
            let values = read_values(&values)?;
            let report = form.validate_submission(&values)?;
            writeln!(out, "{}", render::report(form, &report))?;
            if !report.all_valid {
                writeln!(out, "Submission rejected")?;
                return Ok(Outcome::Rejected);
            }
            writeln!(out, "Submission accepted")?;
        }
        Commands::Columns { form, json } => {
            let form = store.find_form(&form)?;
            let Some(schema) = form.schema() else {
                bail!("form '{}' is {}, not published", form.name(), form.status());
            };
            let columns = schema.columns();
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&columns)?)?;
            } else {
                writeln!(out, "{}", render::columns(&columns))?;
            }
        }
    }
    Ok(Outcome::Done)
}

fn types(registry: &FieldRegistry, json: bool, out: &mut impl Write) -> Result<()> {
    if json {
        let entries: Vec<Value> = registry
            .palette()
            .map(|d| {
                serde_json::json!({
                    "type": d.tag(),
                    "label": d.designer_label(),
                    "layout": d.is_layout(),
                    "default_configuration": d.default_configuration(),
                })
            })
            .collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&entries)?)?;
    } else {
        writeln!(out, "{}", render::palette(registry))?;
    }
    Ok(())
}

/// Apply one document operation to a stored form and persist it.
async fn edit<F>(store: &mut FormStore, key: &str, op: F) -> Result<()>
where
    F: FnOnce(&DesignerDocument) -> formforge_designer::Result<DesignerDocument>,
{
    let mut form: Form = store.find_form(key)?.clone();
    form.edit(op)?;
    store.write_form(&form).await?;
    Ok(())
}

/// Merge `changes` over the field's current configuration and commit it
/// through the validator.
async fn configure(store: &mut FormStore, key: &str, field: &str, changes: &str) -> Result<()> {
    let changes: Value = serde_json::from_str(changes).context("changes must be JSON")?;
    let Value::Object(changes) = changes else {
        bail!("changes must be a JSON object");
    };

    let form = store.find_form(key)?;
    let instance = form
        .document()
        .get(field)
        .ok_or_else(|| formforge_designer::DesignerError::instance_not_found(field))?;
    let mut merged = serde_json::to_value(instance.configuration())?;
    if let Value::Object(map) = &mut merged {
        map.extend(changes);
    }
    let config = store
        .registry()
        .decode_configuration(instance.tag(), merged)?;
    debug!(field, tag = %instance.tag(), "configuring field");

    edit(store, key, |d| d.update_configuration(field, config)).await
}

fn load_document(path: &Path, registry: Arc<FieldRegistry>) -> Result<DesignerDocument> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let payload = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => SchemaPayload::from_yaml(&text)?,
        _ => SchemaPayload::from_json(&text)?,
    };
    DesignerDocument::deserialize(registry, payload)
        .with_context(|| format!("cannot load schema {}", path.display()))
}

fn read_values(path: &Path) -> Result<SubmissionValues> {
    let text = if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        text
    } else {
        std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?
    };
    serde_json::from_str(&text).context("submission must be a JSON object of strings")
}
