use thiserror::Error;

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid day option: {0}")]
    InvalidDay(String),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T, E = MenuError> = std::result::Result<T, E>;
