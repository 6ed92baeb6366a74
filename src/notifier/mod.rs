//! The toast engine: a single run-loop task owning the container, fed by a
//! bounded command queue and the surface's event stream.
//!
//! All mutation is serialized through the one task, so toast ordering is
//! exactly the order commands arrive. Per toast the lifecycle is
//! inserted-hidden, visible on the next frame, hidden again after the show
//! duration, removed once the hide transition ends.

mod container;

use std::time::Duration;

use async_channel::{Receiver, Sender, TrySendError, bounded};
use reqwest::header::HeaderMap;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};
use url::Url;

use crate::Result;
use crate::config::Config;
use crate::error::Error as ToastError;
use crate::flash;
use crate::surface::{Surface, SurfaceEvent, ToastView};
use crate::trigger;
use crate::types::{Kind, ToastId};

use container::{Container, Phase, Toast};

/// Idle deadline used when no toast is waiting to hide.
const FAR_FUTURE: Duration = Duration::from_secs(24 * 60 * 60);

pub(crate) enum Command {
    Show { message: String, kind: Kind },
    AfterLoad { headers: HeaderMap },
    Init { location: Url, reply: oneshot::Sender<Url> },
}

/// Handle to a running toast engine. Cloning is cheap; all clones feed the
/// same container.
#[derive(Clone)]
pub struct Notifier {
    commands: Sender<Command>,
}

impl Notifier {
    /// Spawn the engine over `surface`, listening for the surface's events
    /// on `events`.
    pub fn spawn(
        config: &Config,
        surface: impl Surface + 'static,
        events: Receiver<SurfaceEvent>,
    ) -> (Self, JoinHandle<()>) {
        let (commands, rx) = bounded(config.queue_capacity);
        let engine = Engine {
            surface,
            container: Container::default(),
            container_ready: false,
            show_duration: config.show_duration,
            container_id: config.container_id.clone(),
        };
        let handle = tokio::spawn(engine.run(rx, events));
        (Self { commands }, handle)
    }

    /// Queue a toast.
    ///
    /// # Errors
    ///
    /// Returns [`ToastError::NotifierClosed`] if the engine has stopped.
    pub async fn show(&self, message: impl Into<String>, kind: Kind) -> Result<()> {
        self.commands
            .send(Command::Show {
                message: message.into(),
                kind,
            })
            .await
            .map_err(|_| ToastError::NotifierClosed)
    }

    /// Fire-and-forget variant of [`show`](Self::show) for callers that
    /// cannot await. A full or closed queue is logged and the toast
    /// dropped.
    pub fn try_show(&self, message: impl Into<String>, kind: Kind) {
        match self.commands.try_send(Command::Show {
            message: message.into(),
            kind,
        }) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => warn!("toast queue full; dropping toast"),
            Err(TrySendError::Closed(_)) => warn!("toast engine stopped; dropping toast"),
        }
    }

    /// Ensure the container exists and surface any flash parameters
    /// carried by `location`.
    ///
    /// Returns the cleaned URL the caller should install as the
    /// replacement for the current history entry (same entry, no
    /// navigation). Safe to call before the engine has started processing:
    /// the command simply queues until the run loop is ready.
    ///
    /// # Errors
    ///
    /// Returns [`ToastError::NotifierClosed`] if the engine has stopped.
    pub async fn init(&self, location: Url) -> Result<Url> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(Command::Init { location, reply })
            .await
            .map_err(|_| ToastError::NotifierClosed)?;
        rx.await.map_err(|_| ToastError::NotifierClosed)
    }

    /// Inspect the response headers of a finished partial-page update and
    /// surface any messages they signal.
    ///
    /// # Errors
    ///
    /// Returns [`ToastError::NotifierClosed`] if the engine has stopped.
    pub async fn after_load(&self, headers: HeaderMap) -> Result<()> {
        self.commands
            .send(Command::AfterLoad { headers })
            .await
            .map_err(|_| ToastError::NotifierClosed)
    }

    /// Close the command queue. The engine finishes the lifecycle of every
    /// live toast and then returns.
    pub fn close(&self) {
        self.commands.close();
    }
}

struct Engine<S> {
    surface: S,
    container: Container,
    container_ready: bool,
    show_duration: Duration,
    container_id: String,
}

impl<S: Surface> Engine<S> {
    async fn run(mut self, commands: Receiver<Command>, events: Receiver<SurfaceEvent>) {
        let mut draining = false;
        loop {
            if draining && self.container.is_empty() {
                break;
            }
            let deadline = self.container.next_deadline();
            let sleep_target = deadline.unwrap_or_else(|| Instant::now() + FAR_FUTURE);
            tokio::select! {
                biased;
                command = commands.recv(), if !draining => match command {
                    Ok(command) => self.handle_command(command),
                    Err(_) => {
                        debug!(live = self.container.len(), "command queue closed, draining");
                        draining = true;
                    }
                },
                event = events.recv() => match event {
                    Ok(event) => self.handle_event(event),
                    Err(_) => {
                        warn!("surface event stream closed, stopping engine");
                        break;
                    }
                },
                () = sleep_until(sleep_target), if deadline.is_some() => {
                    self.hide_expired(Instant::now());
                }
            }
        }
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Show { message, kind } => self.show(message, kind),
            Command::AfterLoad { headers } => {
                for (message, kind) in trigger::scan(&headers) {
                    info!(%kind, message = %message, "trigger header toast");
                    self.show(message, kind);
                }
            }
            Command::Init { mut location, reply } => {
                self.ensure_container();
                for flash in flash::drain(&mut location) {
                    self.show(flash.message, flash.kind);
                }
                if reply.send(location).is_err() {
                    debug!("init caller went away before receiving the cleaned URL");
                }
            }
        }
    }

    fn handle_event(&mut self, event: SurfaceEvent) {
        match event {
            SurfaceEvent::Frame => self.reveal_pending(),
            SurfaceEvent::TransitionEnd(id) => self.finish_transition(id),
        }
    }

    fn ensure_container(&mut self) {
        if self.container_ready {
            return;
        }
        if let Err(err) = self.surface.ensure_container(&self.container_id) {
            warn!(error = %err, "failed to create toast container");
            return;
        }
        self.container_ready = true;
    }

    fn show(&mut self, message: String, kind: Kind) {
        self.ensure_container();
        if !self.container_ready {
            // Nothing to render into; degrade silently.
            return;
        }
        let toast = Toast::new(message, kind);
        let view = ToastView {
            id: toast.id,
            message: &toast.message,
            kind: toast.kind,
            glyph: toast.kind.glyph(),
        };
        if let Err(err) = self.surface.insert(view) {
            warn!(error = %err, "failed to insert toast, dropping it");
            return;
        }
        self.container.push(toast);
    }

    /// One frame after insertion the initial and final states differ, so
    /// the show transition can play.
    fn reveal_pending(&mut self) {
        let now = Instant::now();
        for id in self.container.pending_frame() {
            if let Err(err) = self.surface.set_visible(id, true) {
                warn!(%id, error = %err, "failed to reveal toast, removing it");
                let _ = self.surface.remove(id);
                self.container.remove(id);
                continue;
            }
            if let Some(toast) = self.container.get_mut(id) {
                toast.phase = Phase::Visible;
                toast.hide_at = Some(now + self.show_duration);
            }
        }
    }

    fn hide_expired(&mut self, now: Instant) {
        for id in self.container.expired(now) {
            if let Err(err) = self.surface.set_visible(id, false) {
                warn!(%id, error = %err, "failed to hide toast, removing it");
                let _ = self.surface.remove(id);
                self.container.remove(id);
                continue;
            }
            if let Some(toast) = self.container.get_mut(id) {
                toast.phase = Phase::Hiding;
                toast.hide_at = None;
            }
        }
    }

    /// Removal happens only once the hide transition has finished; the end
    /// of the show transition is ignored.
    fn finish_transition(&mut self, id: ToastId) {
        let Some(toast) = self.container.get_mut(id) else {
            return;
        };
        if toast.phase != Phase::Hiding {
            return;
        }
        if let Err(err) = self.surface.remove(id) {
            warn!(%id, error = %err, "failed to remove toast element");
        }
        self.container.remove(id);
    }
}
