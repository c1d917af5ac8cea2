use std::path::Path;

use common::config::{BackendConfig, DashboardConfig};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CliConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

impl CliConfig {
    /// Read `path` when given, else `config/config.toml` if present, then
    /// apply `DIRECTORY__*` environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name("config/config").required(false),
        };
        let s = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix("DIRECTORY").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
