use std::path::PathBuf;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tokio::signal;
use tracing::{info, warn};

use hx_toast::Result;
use hx_toast::config::Config;
use hx_toast::error::{ConfigError, Error as ToastError};
use hx_toast::global;
use hx_toast::notifier::Notifier;
use hx_toast::surface::{HeadlessSurface, run_frame_clock};
use hx_toast::telemetry::init_tracing;
use hx_toast::types::Kind;

use super::cli::Cli;

const DEFAULT_CONFIG: &str = "config.toml";

pub async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.log_filter.as_deref(), cli.json_logs)?;

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let mut config = Config::from_env_and_file(&config_path)?;
    if let Some(duration) = cli.duration {
        config.show_duration = duration;
    }

    let (surface, events) = HeadlessSurface::new(config.transition);
    let frames = surface.events();
    let frame_clock = tokio::spawn(run_frame_clock(frames, config.frame_interval));

    let (notifier, engine) = Notifier::spawn(&config, surface, events);
    if !global::install(notifier.clone()) {
        warn!("a global notifier was already installed");
    }

    if let Some(url) = cli.url.clone() {
        let cleaned = notifier.init(url).await?;
        info!(url = %cleaned, "history entry replaced with cleaned URL");
    }

    for spec in &cli.messages {
        let (kind, message) = split_message(spec);
        notifier.show(message, kind).await?;
    }

    if !cli.headers.is_empty() {
        let mut headers = HeaderMap::new();
        for spec in &cli.headers {
            let (name, value) = split_header(spec)?;
            headers.append(name, value);
        }
        notifier.after_load(headers).await?;
    }

    if let Some(url) = cli.fetch.clone() {
        let response = reqwest::get(url.clone())
            .await
            .map_err(|source| ToastError::Fetch { source })?;
        info!(url = %url, status = %response.status(), "partial update fetched");
        notifier.after_load(response.headers().clone()).await?;
    }

    notifier.close();
    let mut engine = engine;
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("interrupted, abandoning live toasts");
            engine.abort();
        }
        res = &mut engine => {
            if let Err(err) = res {
                warn!(error = %err, "engine task terminated unexpectedly");
            }
        }
    }
    frame_clock.abort();

    Ok(())
}

/// Split a `KIND:TEXT` message spec. Only the three known kind labels are
/// treated as a prefix, so messages containing colons stay intact.
fn split_message(spec: &str) -> (Kind, String) {
    match spec.split_once(':') {
        Some((label, text)) if matches!(label, "success" | "error" | "info") => {
            (Kind::from_label(label), text.trim_start().to_string())
        }
        _ => (Kind::Success, spec.to_string()),
    }
}

fn split_header(spec: &str) -> Result<(HeaderName, HeaderValue)> {
    let (name, value) = spec.split_once(':').ok_or_else(|| {
        ToastError::Config(ConfigError::InvalidField {
            field: "cli.header",
            message: "expected `NAME: JSON`".to_string(),
        })
    })?;
    let name = HeaderName::from_bytes(name.trim().as_bytes()).map_err(|err| {
        ToastError::Config(ConfigError::InvalidField {
            field: "cli.header",
            message: err.to_string(),
        })
    })?;
    let value = HeaderValue::from_str(value.trim()).map_err(|err| {
        ToastError::Config(ConfigError::InvalidField {
            field: "cli.header",
            message: err.to_string(),
        })
    })?;
    Ok((name, value))
}

#[cfg(test)]
mod tests {
    use super::{split_header, split_message};
    use hx_toast::types::Kind;

    #[test]
    fn message_specs_split_on_known_kinds_only() {
        assert_eq!(
            split_message("error: disk full"),
            (Kind::Error, "disk full".to_string())
        );
        assert_eq!(
            split_message("https://example.com"),
            (Kind::Success, "https://example.com".to_string())
        );
        assert_eq!(split_message("plain"), (Kind::Success, "plain".to_string()));
        // Labels are matched exactly; an uppercase prefix is plain text.
        assert_eq!(
            split_message("ERROR: loud"),
            (Kind::Success, "ERROR: loud".to_string())
        );
    }

    #[test]
    fn header_specs_need_a_name_and_value() {
        assert!(split_header(r#"HX-Trigger: {"showMessage":"ok"}"#).is_ok());
        assert!(split_header("no-colon-here").is_err());
    }
}
