use chrono::NaiveDate;
use config::{Config as ConfigBuilder, Environment, File, Map};
use serde::Deserialize;
use std::env;

use crate::error::{MenuError, Result};

pub const DEFAULT_SELECTED_MEAL: &str = "Lunch";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MenuConfig {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Initial values for the menu state cells
#[derive(Debug, Deserialize, Clone)]
pub struct DefaultsConfig {
    #[serde(default = "default_selected_meal")]
    pub selected_meal: String,
    /// Empty means no day selected
    #[serde(default)]
    pub selected_day: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            selected_meal: default_selected_meal(),
            selected_day: String::new(),
        }
    }
}

fn default_selected_meal() -> String {
    DEFAULT_SELECTED_MEAL.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl MenuConfig {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (IMKITCHEN_MENU__DEFAULTS__SELECTED_MEAL, etc.)
    /// 2. Config file specified by path, CONFIG_PATH, or config/default.toml
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self> {
        Self::load_with_env(config_path, None)
    }

    /// Same as [`MenuConfig::load`], reading overrides from `env_vars` instead
    /// of the process environment when given.
    pub fn load_with_env(
        config_path: Option<String>,
        env_vars: Option<Map<String, String>>,
    ) -> Result<Self> {
        let mut builder = ConfigBuilder::builder()
            .set_default("defaults.selected_meal", DEFAULT_SELECTED_MEAL)?
            .set_default("defaults.selected_day", "")?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.format", default_log_format())?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional: a missing file falls back to defaults
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("IMKITCHEN_MENU")
                .separator("__")
                .source(env_vars),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        tracing::debug!(
            path = %config_file_path,
            selected_meal = %config.defaults.selected_meal,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(MenuError::InvalidConfig(format!(
                "logging.format must be \"pretty\" or \"json\", got \"{}\"",
                self.logging.format
            )));
        }

        let day = &self.defaults.selected_day;
        if !day.is_empty() && NaiveDate::parse_from_str(day, DATE_FORMAT).is_err() {
            return Err(MenuError::InvalidConfig(format!(
                "defaults.selected_day must be empty or YYYY-MM-DD, got \"{}\"",
                day
            )));
        }

        Ok(())
    }
}
