use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use serde_with::serde_as;

use crate::Result;
use crate::error::ConfigError;

use super::defaults::{
    default_container_id, default_frame_interval, default_queue_capacity, default_show_duration,
    default_transition,
};
use super::env::{env_duration, env_parse, env_string};
use super::{Config, HumantimeDuration};

pub(super) fn load(path: impl AsRef<Path>) -> std::result::Result<RawConfig, ConfigError> {
    let mut builder = ::config::Config::builder();
    let path = path.as_ref();
    builder = builder.add_source(::config::File::from(path).required(false));
    builder = builder.add_source(
        ::config::Environment::with_prefix("HX_TOAST")
            .separator("__")
            .try_parsing(true),
    );

    builder
        .build()
        .map_err(|err| ConfigError::Other(err.to_string()))?
        .try_deserialize()
        .map_err(|err| ConfigError::Parse(err.to_string()))
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub(super) toast: RawToast,
    #[serde(default)]
    pub(super) app: RawApp,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub(super) struct RawToast {
    #[serde(default = "default_show_duration")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) duration: Duration,
    #[serde(default = "default_transition")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) transition: Duration,
    #[serde(default = "default_container_id")]
    pub(super) container_id: String,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub(super) struct RawApp {
    #[serde(default = "default_frame_interval")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) frame_interval: Duration,
    #[serde(default = "default_queue_capacity")]
    pub(super) queue_capacity: usize,
}

impl RawConfig {
    pub(super) fn apply_env_overrides(&mut self) -> std::result::Result<(), ConfigError> {
        if let Some(duration) = env_duration("TOAST_DURATION")? {
            self.toast.duration = duration;
        }
        if let Some(transition) = env_duration("TOAST_TRANSITION")? {
            self.toast.transition = transition;
        }
        if let Some(container_id) = env_string("TOAST_CONTAINER_ID")? {
            self.toast.container_id = container_id;
        }
        if let Some(interval) = env_duration("FRAME_INTERVAL")? {
            self.app.frame_interval = interval;
        }
        if let Some(capacity) = env_parse::<usize>("QUEUE_CAPACITY")? {
            self.app.queue_capacity = capacity;
        }
        Ok(())
    }

    pub(super) fn validate_and_build(self) -> Result<Config> {
        if self.toast.duration.is_zero() {
            return Err(ConfigError::InvalidField {
                field: "toast.duration",
                message: "show duration must be greater than zero".to_string(),
            }
            .into());
        }
        if self.toast.container_id.trim().is_empty() {
            return Err(ConfigError::InvalidField {
                field: "toast.container_id",
                message: "container id cannot be empty".to_string(),
            }
            .into());
        }
        if self.app.frame_interval.is_zero() {
            return Err(ConfigError::InvalidField {
                field: "app.frame_interval",
                message: "frame interval must be greater than zero".to_string(),
            }
            .into());
        }
        if self.app.queue_capacity == 0 {
            return Err(ConfigError::InvalidField {
                field: "app.queue_capacity",
                message: "queue capacity must be greater than zero".to_string(),
            }
            .into());
        }

        Ok(Config {
            show_duration: self.toast.duration,
            transition: self.toast.transition,
            container_id: self.toast.container_id,
            frame_interval: self.app.frame_interval,
            queue_capacity: self.app.queue_capacity,
        })
    }
}

impl Default for RawToast {
    fn default() -> Self {
        Self {
            duration: default_show_duration(),
            transition: default_transition(),
            container_id: default_container_id(),
        }
    }
}

impl Default for RawApp {
    fn default() -> Self {
        Self {
            frame_interval: default_frame_interval(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RawConfig;
    use serde_json::json;
    use std::time::Duration;

    fn raw(value: serde_json::Value) -> RawConfig {
        match serde_json::from_value(value) {
            Ok(raw) => raw,
            Err(err) => panic!("raw config should deserialize: {err}"),
        }
    }

    #[test]
    fn defaults_build_a_valid_config() {
        let config = match raw(json!({})).validate_and_build() {
            Ok(config) => config,
            Err(err) => panic!("defaults must validate: {err}"),
        };
        assert_eq!(config.show_duration, Duration::from_millis(4000));
        assert_eq!(config.frame_interval, Duration::from_millis(16));
        assert_eq!(config.queue_capacity, 64);
    }

    #[test]
    fn zero_duration_is_rejected() {
        let err = raw(json!({"toast": {"duration": "0s"}})).validate_and_build();
        assert!(err.is_err());
    }

    #[test]
    fn blank_container_id_is_rejected() {
        let err = raw(json!({"toast": {"container_id": "  "}})).validate_and_build();
        assert!(err.is_err());
    }
}
