//! Configuration provider using Figment

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use formforge_fields::FieldRegistry;
use tracing::{debug, trace};

use crate::discovery::{ConfigFile, ConfigFormat, FileDiscovery};
use crate::error::{ConfigError, ConfigResult};
use crate::types::FormforgeConfig;

/// Environment variable prefix; nested keys are separated by `__`
pub const ENV_PREFIX: &str = "FORMFORGE_";

/// Loads [`FormforgeConfig`] from every source, in precedence order:
///
/// 1. Defaults
/// 2. Global file (`~/.formforge/formforge.*`)
/// 3. Project file (`./.formforge/formforge.*`)
/// 4. `FORMFORGE_` environment variables
///
/// Nothing is cached; each load reads the sources again.
#[derive(Debug, Clone, Default)]
pub struct ConfigProvider {
    discovery: FileDiscovery,
}

impl ConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider searching the given discovery's directories.
    pub fn with_discovery(discovery: FileDiscovery) -> Self {
        Self { discovery }
    }

    /// Load and validate the configuration.
    pub fn load(&self) -> ConfigResult<FormforgeConfig> {
        let config: FormforgeConfig = self.build_figment().extract()?;
        validate(&config)?;
        debug!(
            log_level = %config.log_level,
            store_dir = ?config.store_dir,
            "configuration loaded"
        );
        Ok(config)
    }

    fn build_figment(&self) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(FormforgeConfig::default()));
        for file in self.discovery.discover_all() {
            trace!("Loading config file: {}", file.path.display());
            figment = figment.merge(file_provider(&file));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}

fn file_provider(file: &ConfigFile) -> Figment {
    match file.format {
        ConfigFormat::Toml => Figment::from(Toml::file(&file.path)),
        ConfigFormat::Yaml => Figment::from(Yaml::file(&file.path)),
        ConfigFormat::Json => Figment::from(Json::file(&file.path)),
    }
}

/// Reject limits no field could satisfy.
fn validate(config: &FormforgeConfig) -> ConfigResult<()> {
    if let Some(name) = config.limits.malformed_bounds().first() {
        return Err(ConfigError::invalid_value(
            format!("limits.{name}"),
            "min must not exceed max",
        ));
    }
    FieldRegistry::with_limits(config.limits.clone())
        .check_defaults()
        .map_err(|e| ConfigError::invalid_value("limits", e.to_string()))
}

/// Load the configuration from the standard locations.
pub fn load_config() -> ConfigResult<FormforgeConfig> {
    ConfigProvider::new().load()
}
