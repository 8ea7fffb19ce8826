//! FormStore: forms persisted as YAML files.
//!
//! Owns a directory on disk with the structure:
//! ```text
//! <root>/
//!   forms/    ← one <form id>.yaml per form
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use formforge_fields::FieldRegistry;
use indexmap::IndexMap;
use tokio::fs;
use tracing::{debug, warn};
use ulid::Ulid;

use crate::error::{DesignerError, Result};
use crate::form::{Form, FormRecord};

/// Builder for `FormStore`. Created by `FormStore::open()`.
pub struct FormStoreBuilder {
    root: PathBuf,
    registry: Option<Arc<FieldRegistry>>,
}

impl FormStoreBuilder {
    /// Registry used to load and edit forms. Defaults to the global registry.
    pub fn with_registry(mut self, registry: Arc<FieldRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Build the store: create directories, load every form from disk.
    pub async fn build(self) -> Result<FormStore> {
        let forms_dir = self.root.join("forms");
        fs::create_dir_all(&forms_dir).await?;

        let mut store = FormStore {
            root: self.root,
            registry: self.registry.unwrap_or_else(FieldRegistry::global),
            forms: IndexMap::new(),
        };
        store.load_forms().await?;

        debug!(forms = store.forms.len(), root = ?store.root, "form store opened");
        Ok(store)
    }
}

/// File-backed collection of forms, keyed by form id.
pub struct FormStore {
    root: PathBuf,
    registry: Arc<FieldRegistry>,
    forms: IndexMap<Ulid, Form>,
}

impl FormStore {
    /// Open or create a store. Returns a builder for optional configuration.
    ///
    /// ```rust,ignore
    /// let store = FormStore::open(path).build().await?;
    /// ```
    pub fn open(root: impl Into<PathBuf>) -> FormStoreBuilder {
        FormStoreBuilder {
            root: root.into(),
            registry: None,
        }
    }

    pub fn registry(&self) -> &Arc<FieldRegistry> {
        &self.registry
    }

    /// A new draft bound to this store's registry. Not persisted until written.
    pub fn new_form(&self, name: impl Into<String>) -> Form {
        Form::new(name, Arc::clone(&self.registry))
    }

    pub fn get_form(&self, id: &Ulid) -> Option<&Form> {
        self.forms.get(id)
    }

    /// Find a form by id, or failing that by exact name.
    pub fn find_form(&self, key: &str) -> Result<&Form> {
        if let Ok(id) = Ulid::from_string(key) {
            if let Some(form) = self.forms.get(&id) {
                return Ok(form);
            }
        }
        self.forms
            .values()
            .find(|f| f.name() == key)
            .ok_or_else(|| DesignerError::FormNotFound { id: key.to_string() })
    }

    /// All forms, oldest first.
    pub fn all_forms(&self) -> impl Iterator<Item = &Form> {
        self.forms.values()
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    /// Write (create or update) a form. Persists to YAML immediately.
    pub async fn write_form(&mut self, form: &Form) -> Result<()> {
        let yaml = serde_yaml_ng::to_string(&form.to_record()?)?;
        atomic_write(&self.form_path(&form.id()), yaml.as_bytes()).await?;
        self.forms.insert(form.id(), form.clone());
        debug!(form = %form.id(), name = form.name(), "wrote form");
        Ok(())
    }

    /// Delete a form, returning what was removed.
    pub async fn delete_form(&mut self, id: &Ulid) -> Result<Form> {
        let form = self
            .forms
            .shift_remove(id)
            .ok_or_else(|| DesignerError::FormNotFound { id: id.to_string() })?;
        let path = self.form_path(id);
        if let Err(e) = fs::remove_file(&path).await {
            warn!(?path, %e, "could not remove form file");
        }
        debug!(form = %id, "deleted form");
        Ok(form)
    }

    /// The root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn form_path(&self, id: &Ulid) -> PathBuf {
        self.root.join("forms").join(format!("{id}.yaml"))
    }

    async fn load_forms(&mut self) -> Result<()> {
        let forms_dir = self.root.join("forms");
        let mut loaded = Vec::new();
        let mut entries = fs::read_dir(&forms_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
                continue;
            }
            let content = match fs::read_to_string(&path).await {
                Ok(content) => content,
                Err(e) => {
                    warn!(?path, %e, "skipping unreadable form");
                    continue;
                }
            };
            match self.parse_form(&content) {
                Ok(form) => loaded.push(form),
                Err(e) => {
                    warn!(?path, %e, "skipping invalid form");
                }
            }
        }
        loaded.sort_by_key(|f| (f.created_at(), f.id()));
        self.forms = loaded.into_iter().map(|f| (f.id(), f)).collect();
        Ok(())
    }

    fn parse_form(&self, content: &str) -> Result<Form> {
        let record: FormRecord = serde_yaml_ng::from_str(content)?;
        Form::from_record(Arc::clone(&self.registry), record)
    }
}

/// Write to a temp file then rename for atomic persistence.
async fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "no parent dir"))?;
    let tmp = dir.join(format!(".tmp_{}", Ulid::new()));
    fs::write(&tmp, data).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormStatus;
    use formforge_fields::FieldTypeTag;
    use tempfile::TempDir;

    async fn open(root: &Path) -> FormStore {
        FormStore::open(root)
            .with_registry(Arc::new(FieldRegistry::builtin()))
            .build()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn open_creates_directories() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("store");
        let store = open(&root).await;
        assert!(root.join("forms").is_dir());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn write_and_reload_form() {
        let tmp = TempDir::new().unwrap();
        let mut store = open(tmp.path()).await;

        let mut form = store.new_form("Signup").with_description("Newsletter signup");
        form.edit_returning(|d| d.insert(FieldTypeTag::Email, None))
            .unwrap();
        form.publish().unwrap();
        store.write_form(&form).await.unwrap();
        assert!(tmp
            .path()
            .join(format!("forms/{}.yaml", form.id()))
            .exists());

        let reopened = open(tmp.path()).await;
        let loaded = reopened.get_form(&form.id()).unwrap();
        assert_eq!(loaded.name(), "Signup");
        assert_eq!(loaded.description(), Some("Newsletter signup"));
        assert_eq!(loaded.status(), FormStatus::Published);
        assert_eq!(loaded.document(), form.document());
    }

    #[tokio::test]
    async fn find_by_id_or_name() {
        let tmp = TempDir::new().unwrap();
        let mut store = open(tmp.path()).await;
        let form = store.new_form("Survey");
        store.write_form(&form).await.unwrap();

        assert_eq!(store.find_form("Survey").unwrap().id(), form.id());
        assert_eq!(
            store.find_form(&form.id().to_string()).unwrap().name(),
            "Survey"
        );
        assert!(matches!(
            store.find_form("Missing"),
            Err(DesignerError::FormNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn delete_form_removes_file() {
        let tmp = TempDir::new().unwrap();
        let mut store = open(tmp.path()).await;
        let form = store.new_form("Temp");
        store.write_form(&form).await.unwrap();

        store.delete_form(&form.id()).await.unwrap();
        assert!(store.get_form(&form.id()).is_none());
        assert!(!tmp.path().join(format!("forms/{}.yaml", form.id())).exists());
        assert!(matches!(
            store.delete_form(&form.id()).await,
            Err(DesignerError::FormNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn invalid_files_are_skipped() {
        let tmp = TempDir::new().unwrap();
        let forms = tmp.path().join("forms");
        std::fs::create_dir_all(&forms).unwrap();
        std::fs::write(forms.join("broken.yaml"), "not: [a form").unwrap();
        std::fs::write(
            forms.join("unknown.yaml"),
            format!(
                "id: {}\nname: Old\nstatus: draft\ncreated_at: 2024-01-01T00:00:00Z\nschema:\n  schema_version: 1\n  fields:\n    - id: r1\n      type: RatingField\n",
                Ulid::new()
            ),
        )
        .unwrap();
        std::fs::write(forms.join("notes.txt"), "ignored").unwrap();

        let store = open(tmp.path()).await;
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn non_utf8_file_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let mut store = open(tmp.path()).await;
        let form = store.new_form("Kept");
        store.write_form(&form).await.unwrap();
        std::fs::write(tmp.path().join("forms/garbled.yaml"), [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let store = open(tmp.path()).await;
        assert_eq!(store.len(), 1);
        assert_eq!(store.find_form("Kept").unwrap().id(), form.id());
    }
}
