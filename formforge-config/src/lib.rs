//! Formforge configuration using Figment
//!
//! Sources, later overriding earlier:
//!
//! - Defaults ([`FormforgeConfig::default`])
//! - Global: `~/.formforge/formforge.{toml,yaml,yml,json}`
//! - Project: `./.formforge/formforge.{toml,yaml,yml,json}`
//! - Environment: `FORMFORGE_` prefix, nested keys split on `__`
//!   (`FORMFORGE_LIMITS__LABEL__MAX=80`)
//!
//! ## Example TOML Configuration
//!
//! ```toml
//! log_level = "info"
//! store_dir = "forms-data"
//!
//! [limits]
//! options_max = 20
//!
//! [limits.label]
//! min = 2
//! max = 80
//! ```

pub mod discovery;
pub mod error;
pub mod provider;
pub mod types;

pub use discovery::{ConfigFile, ConfigFormat, ConfigScope, FileDiscovery, CONFIG_DIR_NAME};
pub use error::{ConfigError, ConfigResult};
pub use provider::{load_config, ConfigProvider, ENV_PREFIX};
pub use types::{FormforgeConfig, DEFAULT_LOG_LEVEL};
