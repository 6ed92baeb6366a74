//! Process-wide access to a running [`Notifier`], for call sites that
//! cannot thread the handle through.

use std::sync::OnceLock;

use tracing::warn;

use crate::notifier::Notifier;
use crate::types::Kind;

static GLOBAL: OnceLock<Notifier> = OnceLock::new();

/// Install `notifier` as the process-wide entry point.
///
/// Returns `false` if one was already installed; the first one wins.
pub fn install(notifier: Notifier) -> bool {
    GLOBAL.set(notifier).is_ok()
}

/// Show a toast through the installed notifier.
///
/// `kind` is a free-form label; anything but `success` or `error` renders
/// as informational. Fire-and-forget: when no notifier is installed, or
/// its queue is full, the toast is logged and dropped.
pub fn show_toast(message: &str, kind: &str) {
    let Some(notifier) = GLOBAL.get() else {
        warn!(message, "show_toast called before a notifier was installed");
        return;
    };
    notifier.try_show(message, Kind::from_label(kind));
}

#[cfg(test)]
mod tests {
    use super::{install, show_toast};
    use crate::config::Config;
    use crate::notifier::Notifier;
    use crate::surface::{HeadlessSurface, SurfaceEvent, SurfaceOp};
    use std::time::Duration;

    // One test covers the whole global lifecycle: the OnceLock is shared
    // across the test binary, so ordering between tests would be racy.
    #[tokio::test]
    async fn global_entry_point_end_to_end() {
        // Before installation: logged, not a panic.
        show_toast("too early", "success");

        let config = Config {
            show_duration: Duration::from_millis(40),
            transition: Duration::from_millis(5),
            ..Config::default()
        };
        let (surface, events) = HeadlessSurface::new(config.transition);
        let log = surface.log();
        let frames = surface.events();
        let (notifier, engine) = Notifier::spawn(&config, surface, events);

        assert!(install(notifier.clone()));
        assert!(!install(notifier.clone()), "first installation wins");

        show_toast("from the global hook", "warning");
        let _ = frames.send(SurfaceEvent::Frame).await;
        notifier.close();
        let _ = engine.await;

        let messages: Vec<String> = log
            .snapshot()
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Inserted { message, .. } => Some(message.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(messages, vec!["from the global hook".to_string()]);
    }
}
