use thiserror::Error;

use crate::types::ToastId;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error("notifier is not running")]
    NotifierClosed,
    #[error("failed to fetch partial update")]
    Fetch {
        #[source]
        source: reqwest::Error,
    },
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(String),
    #[error("invalid configuration for {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
    #[error("configuration error: {0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("surface backend failed: {0}")]
    Backend(String),
    #[error("unknown toast element: {0}")]
    UnknownToast(ToastId),
}
