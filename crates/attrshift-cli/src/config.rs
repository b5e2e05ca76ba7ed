//! CLI configuration
//!
//! Sources, lowest priority first: built-in defaults, the configuration
//! file (`--config`, or `attrshift.{toml,yaml,json}` in the working
//! directory), then `ATTRSHIFT_*` environment variables. A `.env` file is
//! loaded into the environment beforehand.

use attrshift_sdk::ConverterConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Base name of the configuration file looked up when `--config` is absent
pub const DEFAULT_CONFIG_NAME: &str = "attrshift";

/// Prefix of the environment variables, e.g. `ATTRSHIFT_LOG_LEVEL` or
/// `ATTRSHIFT_CONVERTER__VALIDATE_INPUT`
pub const ENV_PREFIX: &str = "ATTRSHIFT";

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level used when neither `RUST_LOG` nor `-v` / `-q` is given
    pub log_level: String,

    /// Document converter settings
    pub converter: ConverterConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            converter: ConverterConfig::default(),
        }
    }
}

/// Loaded configuration, with a notice to log once tracing is up
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: CliConfig,
    /// Set when a config file was found but could not be used
    pub fallback_notice: Option<String>,
}

impl CliConfig {
    /// Load configuration from the config file and environment variables
    pub fn load(path: Option<&Path>) -> anyhow::Result<LoadedConfig> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        Self::from_sources(path, DEFAULT_CONFIG_NAME, env_source())
    }

    fn from_sources(
        path: Option<&Path>,
        default_name: &str,
        env: config::Environment,
    ) -> anyhow::Result<LoadedConfig> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(default_name).required(false),
        };

        let config_result = config::Config::builder()
            .add_source(file)
            .add_source(env)
            .build();

        match (config_result, path) {
            (Ok(cfg), _) => {
                let config = cfg
                    .try_deserialize()
                    .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e))?;
                Ok(LoadedConfig {
                    config,
                    fallback_notice: None,
                })
            }
            (Err(e), Some(path)) => Err(anyhow::anyhow!(
                "Failed to read config {}: {}",
                path.display(),
                e
            )),
            (Err(e), None) => Ok(LoadedConfig {
                config: Self::default(),
                fallback_notice: Some(format!(
                    "Ignoring unusable configuration ({}), using default configuration",
                    e
                )),
            }),
        }
    }
}

fn env_source() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("converter.attribute_keys")
        .with_list_parse_key("converter.deprecated_widgets")
}
