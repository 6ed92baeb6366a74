//! The rendering seam between the engine and whatever displays toasts.
//!
//! A [`Surface`] materializes container and toast elements; it reports
//! frames and finished visibility transitions back to the engine through a
//! [`SurfaceEvent`] stream. Backends are swappable; the crate ships a
//! recording [`HeadlessSurface`].

mod headless;

pub use headless::{HeadlessSurface, SurfaceLog, SurfaceOp};

use std::time::Duration;

use async_channel::Sender;

use crate::error::SurfaceError;
use crate::types::{Kind, ToastId};

/// Snapshot of a toast handed to the surface at insertion time.
#[derive(Clone, Debug)]
pub struct ToastView<'a> {
    pub id: ToastId,
    pub message: &'a str,
    pub kind: Kind,
    pub glyph: &'static str,
}

/// Events a surface reports back to the engine.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SurfaceEvent {
    /// A rendering frame elapsed.
    Frame,
    /// The visibility transition of one toast finished.
    TransitionEnd(ToastId),
}

/// Where toasts are materialized.
pub trait Surface: Send {
    /// Create the container if it does not exist yet. Idempotent: at most
    /// one container exists per surface.
    fn ensure_container(&mut self, id: &str) -> Result<(), SurfaceError>;

    /// Append a toast, hidden, as the last child of the container.
    fn insert(&mut self, toast: ToastView<'_>) -> Result<(), SurfaceError>;

    /// Toggle a toast's visibility, starting its transition.
    fn set_visible(&mut self, id: ToastId, visible: bool) -> Result<(), SurfaceError>;

    /// Detach a toast element for good.
    fn remove(&mut self, id: ToastId) -> Result<(), SurfaceError>;
}

/// Emit [`SurfaceEvent::Frame`] at a fixed cadence until the engine goes
/// away. Stands in for the renderer's frame callback: a toast inserted
/// hidden becomes visible on the frame after its insertion.
pub async fn run_frame_clock(events: Sender<SurfaceEvent>, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    loop {
        ticker.tick().await;
        if events.send(SurfaceEvent::Frame).await.is_err() {
            break;
        }
    }
}
