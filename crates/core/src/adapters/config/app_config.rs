use config::{Config, Environment, File};
use error_stack::{Report, ResultExt};
use serde::Deserialize;
use serde_path_to_error::{Deserializer as PathDeserializer, Segment, Track};
use thiserror::Error;

use super::{feed_config::FeedConfig, logging_config::LoggingConfig, server_config::ServerConfig};

/// Env var naming the config file (any extension `config` understands).
pub const CONFIG_PATH_VAR: &str = "CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "Config";
/// `SHEETS_FEED__SERVER__PORT=9000` overrides `server.port`.
pub const ENV_PREFIX: &str = "SHEETS_FEED";
const ENV_SEPARATOR: &str = "__";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Error reading config file '{0}'")]
    Read(String),
    #[error("Failed to deserialize config field '{0}'")]
    Deserialize(String),
    #[error("Invalid value for '{field}': {value}")]
    InvalidValue { field: &'static str, value: String },
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub feed: FeedConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Reads the optional config file, then the environment.
    ///
    /// Every field has a default, so an empty environment yields a working
    /// config pointed at the public Google feed.
    pub fn load() -> error_stack::Result<Self, ConfigError> {
        let config_path =
            std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let config = Config::builder()
            .add_source(File::with_name(&config_path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()
            .change_context_lazy(|| ConfigError::Read(config_path.clone()))?;

        Self::from_config(config).attach_printable_lazy(|| format!("config file: {config_path}"))
    }

    pub fn from_config(config: Config) -> error_stack::Result<Self, ConfigError> {
        let value = config
            .try_deserialize::<serde_json::Value>()
            .change_context(ConfigError::Deserialize(String::from("<root>")))?;

        use serde::de::IntoDeserializer;
        let mut track = Track::new();
        let path_de = PathDeserializer::new(value.into_deserializer(), &mut track);
        let app_config = AppConfig::deserialize(path_de).map_err(|e| {
            Report::new(ConfigError::Deserialize(field_path(track)))
                .attach_printable(e.to_string())
        })?;

        app_config.logging.level_filter()?;
        Ok(app_config)
    }
}

fn field_path(track: Track) -> String {
    track
        .path()
        .iter()
        .map(|seg| match seg {
            Segment::Seq { index } => format!("[{}]", index),
            Segment::Map { key } => format!(".{}", key),
            Segment::Enum { variant } => format!("::{}", variant),
            Segment::Unknown => String::from("<?>"),
        })
        .collect::<String>()
        .trim_start_matches('.')
        .to_string()
}
