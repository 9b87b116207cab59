use error_stack::report;
use serde::Deserialize;
use tracing_subscriber::filter::LevelFilter;

use super::app_config::ConfigError;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `trace`, `debug`, `info`, `warn`, `error` or `off`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> error_stack::Result<LevelFilter, ConfigError> {
        self.level.parse::<LevelFilter>().map_err(|_| {
            report!(ConfigError::InvalidValue {
                field: "logging.level",
                value: self.level.clone(),
            })
        })
    }
}
