//! CLI definition for the Formforge command-line interface.
//!
//! Depends only on `clap`, `std` and the field type tag so the command
//! surface can be tested without touching a store.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use formforge_fields::FieldTypeTag;

/// Text format for schemas and reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Formforge - design data-collection forms and validate submissions
#[derive(Parser, Debug)]
#[command(name = "formforge")]
#[command(version)]
#[command(about = "Design data-collection forms and validate submissions against them")]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Form store directory (overrides the configured `store_dir`)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the field types a form can be built from
    Types {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a new draft form
    New {
        /// Form name
        name: String,
        /// Optional description
        #[arg(long)]
        description: Option<String>,
    },
    /// List all forms in the store
    List,
    /// Show a form's fields in order
    Show {
        /// Form id or name
        form: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a field to a draft form
    Add {
        /// Form id or name
        form: String,
        /// Field type, e.g. TextField
        field_type: FieldTypeTag,
        /// Position to insert at (default: end)
        #[arg(long, allow_negative_numbers = true)]
        at: Option<i64>,
    },
    /// Move a field to another position
    Move {
        /// Form id or name
        form: String,
        /// Field id
        field: String,
        /// Target position
        #[arg(allow_negative_numbers = true)]
        index: i64,
    },
    /// Remove a field
    Remove {
        /// Form id or name
        form: String,
        /// Field id
        field: String,
    },
    /// Copy a field, placing the copy right after it
    Duplicate {
        /// Form id or name
        form: String,
        /// Field id
        field: String,
    },
    /// Change a field's configuration
    Configure {
        /// Form id or name
        form: String,
        /// Field id
        field: String,
        /// JSON object of attributes to change, e.g. '{"label": "Name"}'
        changes: String,
    },
    /// Publish a draft so it accepts submissions
    Publish {
        /// Form id or name
        form: String,
    },
    /// Archive a published form
    Archive {
        /// Form id or name
        form: String,
    },
    /// Delete a form from the store
    Delete {
        /// Form id or name
        form: String,
    },
    /// Print a form's schema payload
    Export {
        /// Form id or name
        form: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Create a draft form from a schema payload file
    Import {
        /// Schema file (.json, .yaml or .yml)
        path: PathBuf,
        /// Name of the new form
        #[arg(long)]
        name: String,
    },
    /// Check that a schema payload file loads cleanly
    Check {
        /// Schema file (.json, .yaml or .yml)
        path: PathBuf,
    },
    /// Validate a submission against a published form
    Validate {
        /// Form id or name
        form: String,
        /// JSON object of field id to value; `-` reads stdin
        values: PathBuf,
    },
    /// Show the export columns of a published form
    Columns {
        /// Form id or name
        form: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
