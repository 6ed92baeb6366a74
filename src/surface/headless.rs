use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_channel::{Receiver, Sender};
use tokio::time::Instant;
use tracing::{debug, info};

use crate::error::SurfaceError;
use crate::types::{Kind, ToastId};

use super::{Surface, SurfaceEvent, ToastView};

/// One operation performed by a [`HeadlessSurface`], timestamped relative
/// to the surface's creation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SurfaceOp {
    ContainerCreated {
        at: Duration,
    },
    Inserted {
        id: ToastId,
        message: String,
        kind: Kind,
        glyph: &'static str,
        at: Duration,
    },
    Shown {
        id: ToastId,
        at: Duration,
    },
    Hidden {
        id: ToastId,
        at: Duration,
    },
    Removed {
        id: ToastId,
        at: Duration,
    },
}

/// Shared, append-only record of surface operations.
#[derive(Clone, Debug, Default)]
pub struct SurfaceLog(Arc<Mutex<Vec<SurfaceOp>>>);

impl SurfaceLog {
    fn push(&self, op: SurfaceOp) {
        if let Ok(mut ops) = self.0.lock() {
            ops.push(op);
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<SurfaceOp> {
        self.0.lock().map(|ops| ops.clone()).unwrap_or_default()
    }
}

/// A surface that renders nothing: it records every operation and plays
/// back the transition-end events a real renderer would deliver, one
/// `transition` after each visibility toggle.
pub struct HeadlessSurface {
    log: SurfaceLog,
    events: Sender<SurfaceEvent>,
    transition: Duration,
    epoch: Instant,
    container: bool,
    live: Vec<ToastId>,
}

impl HeadlessSurface {
    /// Create the surface and the event stream the engine listens on.
    #[must_use]
    pub fn new(transition: Duration) -> (Self, Receiver<SurfaceEvent>) {
        let (events, rx) = async_channel::unbounded();
        (
            Self {
                log: SurfaceLog::default(),
                events,
                transition,
                epoch: Instant::now(),
                container: false,
                live: Vec::new(),
            },
            rx,
        )
    }

    /// Handle onto the operation record.
    #[must_use]
    pub fn log(&self) -> SurfaceLog {
        self.log.clone()
    }

    /// Sender half of the event stream, for wiring up a frame clock.
    #[must_use]
    pub fn events(&self) -> Sender<SurfaceEvent> {
        self.events.clone()
    }

    fn elapsed(&self) -> Duration {
        self.epoch.elapsed()
    }

    fn schedule_transition_end(&self, id: ToastId) {
        let events = self.events.clone();
        let transition = self.transition;
        tokio::spawn(async move {
            tokio::time::sleep(transition).await;
            let _ = events.send(SurfaceEvent::TransitionEnd(id)).await;
        });
    }
}

impl Surface for HeadlessSurface {
    fn ensure_container(&mut self, id: &str) -> Result<(), SurfaceError> {
        if self.container {
            return Ok(());
        }
        self.container = true;
        debug!(container = id, "toast container created");
        self.log.push(SurfaceOp::ContainerCreated { at: self.elapsed() });
        Ok(())
    }

    fn insert(&mut self, toast: ToastView<'_>) -> Result<(), SurfaceError> {
        info!(id = %toast.id, kind = %toast.kind, message = %toast.message, "toast inserted");
        self.live.push(toast.id);
        self.log.push(SurfaceOp::Inserted {
            id: toast.id,
            message: toast.message.to_string(),
            kind: toast.kind,
            glyph: toast.glyph,
            at: self.elapsed(),
        });
        Ok(())
    }

    fn set_visible(&mut self, id: ToastId, visible: bool) -> Result<(), SurfaceError> {
        if !self.live.contains(&id) {
            return Err(SurfaceError::UnknownToast(id));
        }
        let at = self.elapsed();
        if visible {
            debug!(%id, "toast visible");
            self.log.push(SurfaceOp::Shown { id, at });
        } else {
            debug!(%id, "toast hidden");
            self.log.push(SurfaceOp::Hidden { id, at });
        }
        self.schedule_transition_end(id);
        Ok(())
    }

    fn remove(&mut self, id: ToastId) -> Result<(), SurfaceError> {
        self.live.retain(|live| *live != id);
        debug!(%id, "toast removed");
        self.log.push(SurfaceOp::Removed { id, at: self.elapsed() });
        Ok(())
    }
}
