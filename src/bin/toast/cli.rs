use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use humantime::parse_duration;
use url::Url;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless toast notification engine", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Initial page URL; its `success`/`error` parameters become toasts
    /// and are stripped from the reported history URL.
    #[arg(long, value_name = "URL")]
    pub url: Option<Url>,

    /// Toast to show, as `KIND:TEXT` or plain text (success). Repeatable.
    #[arg(short, long = "message", value_name = "SPEC")]
    pub messages: Vec<String>,

    /// Simulated trigger header, as `NAME: JSON`. Repeatable; all headers
    /// form one response.
    #[arg(long = "header", value_name = "HEADER")]
    pub headers: Vec<String>,

    /// Fetch this URL and treat its response headers as an after-load
    /// exchange.
    #[arg(long, value_name = "URL")]
    pub fetch: Option<Url>,

    /// Override the auto-hide delay (e.g. "4s").
    #[arg(long, value_parser = parse_duration)]
    pub duration: Option<Duration>,

    /// Use a JSON layer for logs (`--features json-logs`).
    #[arg(long, action = ArgAction::SetTrue)]
    pub json_logs: bool,

    /// Explicit log filter (e.g. "hx_toast=debug").
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
