//! Designer document model, schema persistence and submission validation
//!
//! Builds on `formforge-fields`:
//!
//! - [`DesignerDocument`]: ordered field instances plus the selection, edited
//!   through pure operations that return a new document
//! - [`SchemaPayload`]: the versioned persisted shape of a document
//! - [`submission::validate`]: per-field verdicts for a submitted value map
//! - [`Form`]: draft, published and archived lifecycle around a document
//! - [`FormStore`]: forms on disk as YAML, one file per form

pub mod document;
pub mod error;
pub mod form;
pub mod schema;
pub mod store;
pub mod submission;

pub use document::{checked_index, DesignerDocument};
pub use error::{DesignerError, Result};
pub use form::{ColumnDef, Form, FormRecord, FormStatus, PublishedSchema};
pub use schema::{SchemaPayload, SCHEMA_VERSION};
pub use store::{FormStore, FormStoreBuilder};
pub use submission::{SubmissionValues, ValidationReport};
