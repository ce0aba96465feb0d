pub mod app_config;
pub mod breaker;
pub mod config;
pub mod shops;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use breaker::{BreakerState, CircuitBreaker};
pub use config::{load_app_config, load_app_config_from_env};
pub use shops::{load_shops, ShopConfig, ShopWarning, ShopsFile};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read shops file {path}: {source}")]
    ShopsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse shops file: {0}")]
    ShopsFileParse(#[from] serde_yaml::Error),

    #[error("shops configuration is invalid: {0}")]
    Validation(String),
}
