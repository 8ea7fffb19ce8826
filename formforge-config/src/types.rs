//! Typed configuration

use std::path::PathBuf;

use formforge_fields::FieldLimits;
use serde::{Deserialize, Serialize};

/// Default tracing filter when neither `RUST_LOG` nor `--debug` is given
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Everything Formforge reads from configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormforgeConfig {
    /// Tracing filter directive, e.g. `info` or `formforge_designer=debug`
    pub log_level: String,
    /// Directory holding the form store
    pub store_dir: PathBuf,
    /// Limits applied by field configuration validators
    pub limits: FieldLimits,
}

impl Default for FormforgeConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            store_dir: PathBuf::from(crate::discovery::CONFIG_DIR_NAME),
            limits: FieldLimits::default(),
        }
    }
}
