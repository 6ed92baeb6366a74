#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod config;
pub mod error;
pub mod flash;
pub mod global;
pub mod notifier;
pub mod surface;
pub mod telemetry;
pub mod trigger;
pub mod types;

pub type Result<T> = std::result::Result<T, error::Error>;
