use std::path::Path;
use std::time::Duration;

use crate::Result;
use crate::error::Error as ToastError;

mod defaults;
mod env;
mod raw;
mod serde;

pub(crate) use serde::HumantimeDuration;

/// Engine configuration, validated.
#[derive(Debug, Clone)]
pub struct Config {
    /// How long a toast stays visible before it is toggled hidden.
    pub show_duration: Duration,
    /// Length of the transition-out played by the headless surface.
    pub transition: Duration,
    /// Element id of the container singleton.
    pub container_id: String,
    /// Period of the frame clock standing in for the renderer's frame
    /// callback.
    pub frame_interval: Duration,
    /// Bound of the command queue feeding the engine.
    pub queue_capacity: usize,
}

impl Config {
    /// Load configuration from a TOML file (optional) and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be parsed, when environment
    /// overrides are invalid, or when the resulting values fail validation.
    pub fn from_env_and_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut raw = raw::load(path).map_err(ToastError::from)?;
        raw.apply_env_overrides().map_err(ToastError::from)?;
        raw.validate_and_build()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_duration: defaults::default_show_duration(),
            transition: defaults::default_transition(),
            container_id: defaults::default_container_id(),
            frame_interval: defaults::default_frame_interval(),
            queue_capacity: defaults::default_queue_capacity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use std::time::Duration;

    #[test]
    fn default_config_matches_widget_contract() {
        let config = Config::default();
        assert_eq!(config.show_duration, Duration::from_millis(4000));
        assert_eq!(config.container_id, "toast-container");
    }
}
