//! Client configuration: where the API lives and how to log.
//!
//! Sources, highest precedence first: explicit overrides (command-line
//! flags), `CLIENTES_*` environment variables, a TOML file, defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "clientes.toml";
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

pub const ENV_CONFIG: &str = "CLIENTES_CONFIG";
pub const ENV_BASE_URL: &str = "CLIENTES_BASE_URL";
pub const ENV_LOG_LEVEL: &str = "CLIENTES_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "CLIENTES_LOG_FORMAT";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            logging: LoggingConfig {
                level: "warn".to_string(),
                format: LogFormat::Compact,
            },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FilePatch {
    base_url: Option<String>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

impl ClientConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        Self::load_with_env(options, |key| env::var(key).ok())
    }

    /// Same as [`Self::load`] with environment lookups routed through `var`.
    pub fn load_with_env<F>(options: LoadOptions, var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let explicit_path = options
            .config_path
            .clone()
            .or_else(|| var(ENV_CONFIG).map(PathBuf::from));
        let patch = match explicit_path {
            Some(path) => Some(read_patch(&path)?),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Some(read_patch(default_path)?)
                } else {
                    None
                }
            }
        };
        if let Some(patch) = patch {
            config.apply_file(patch);
        }

        if let Some(base_url) = var(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(level) = var(ENV_LOG_LEVEL) {
            config.logging.level = level;
        }
        if let Some(format) = var(ENV_LOG_FORMAT) {
            config.logging.format = format.parse()?;
        }

        let overrides = options.overrides;
        if let Some(base_url) = overrides.base_url {
            config.base_url = base_url;
        }
        if let Some(level) = overrides.log_level {
            config.logging.level = level;
        }
        if let Some(format) = overrides.log_format {
            config.logging.format = format;
        }

        config.validate()?;
        config.base_url = config.base_url.trim().trim_end_matches('/').to_string();
        Ok(config)
    }

    fn apply_file(&mut self, patch: FilePatch) {
        if let Some(base_url) = patch.base_url {
            self.base_url = base_url;
        }
        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::Validation("base_url must not be empty".to_string()));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "base_url `{base_url}` must start with http:// or https://"
            )));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Validation("logging.level must not be empty".to_string()));
        }
        Ok(())
    }
}

fn read_patch(path: &Path) -> Result<FilePatch, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
    }
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::ParseFile {
        path: path.to_path_buf(),
        source,
    })
}
