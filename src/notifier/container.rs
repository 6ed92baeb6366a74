use tokio::time::Instant;

use crate::types::{Kind, ToastId};

/// Lifecycle phase of one toast.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Phase {
    /// Appended to the container, waiting for the next frame.
    Inserted,
    /// Visible, waiting for its hide deadline.
    Visible,
    /// Toggled hidden, waiting for the transition to end.
    Hiding,
}

#[derive(Clone, Debug)]
pub(crate) struct Toast {
    pub(crate) id: ToastId,
    pub(crate) message: String,
    pub(crate) kind: Kind,
    pub(crate) phase: Phase,
    pub(crate) hide_at: Option<Instant>,
}

impl Toast {
    pub(crate) fn new(message: String, kind: Kind) -> Self {
        Self {
            id: ToastId::new(),
            message,
            kind,
            phase: Phase::Inserted,
            hide_at: None,
        }
    }
}

/// Insertion-ordered set of live toasts. No cap and no deduplication:
/// overlapping toasts simply coexist, oldest first.
#[derive(Debug, Default)]
pub(crate) struct Container {
    toasts: Vec<Toast>,
}

impl Container {
    pub(crate) fn push(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }

    pub(crate) fn get_mut(&mut self, id: ToastId) -> Option<&mut Toast> {
        self.toasts.iter_mut().find(|toast| toast.id == id)
    }

    pub(crate) fn remove(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        self.toasts.len() != before
    }

    /// Ids of toasts still waiting for their first frame, oldest first.
    pub(crate) fn pending_frame(&self) -> Vec<ToastId> {
        self.toasts
            .iter()
            .filter(|toast| toast.phase == Phase::Inserted)
            .map(|toast| toast.id)
            .collect()
    }

    /// Earliest hide deadline among visible toasts.
    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        self.toasts.iter().filter_map(|toast| toast.hide_at).min()
    }

    /// Ids of visible toasts whose hide deadline has passed.
    pub(crate) fn expired(&self, now: Instant) -> Vec<ToastId> {
        self.toasts
            .iter()
            .filter(|toast| {
                toast.phase == Phase::Visible && toast.hide_at.is_some_and(|at| at <= now)
            })
            .map(|toast| toast.id)
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.toasts.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Container, Phase, Toast};
    use crate::types::Kind;
    use std::time::Duration;
    use tokio::time::Instant;

    #[test]
    fn toasts_keep_insertion_order() {
        let mut container = Container::default();
        container.push(Toast::new("first".to_string(), Kind::Success));
        container.push(Toast::new("second".to_string(), Kind::Error));
        let pending = container.pending_frame();
        assert_eq!(pending.len(), 2);
        let first = pending[0];
        assert_eq!(
            container.get_mut(first).map(|t| t.message.clone()),
            Some("first".to_string())
        );
    }

    #[test]
    fn duplicates_are_not_collapsed() {
        let mut container = Container::default();
        container.push(Toast::new("same".to_string(), Kind::Info));
        container.push(Toast::new("same".to_string(), Kind::Info));
        assert_eq!(container.len(), 2);
    }

    #[test]
    fn deadline_tracks_the_earliest_visible_toast() {
        let now = Instant::now();
        let mut container = Container::default();
        let mut early = Toast::new("early".to_string(), Kind::Success);
        early.phase = Phase::Visible;
        early.hide_at = Some(now + Duration::from_secs(1));
        let mut late = Toast::new("late".to_string(), Kind::Success);
        late.phase = Phase::Visible;
        late.hide_at = Some(now + Duration::from_secs(5));
        container.push(early);
        container.push(late);

        assert_eq!(container.next_deadline(), Some(now + Duration::from_secs(1)));
        let expired = container.expired(now + Duration::from_secs(2));
        assert_eq!(expired.len(), 1);
    }

    #[test]
    fn remove_reports_whether_anything_went_away() {
        let mut container = Container::default();
        let toast = Toast::new("gone".to_string(), Kind::Success);
        let id = toast.id;
        container.push(toast);
        assert!(container.remove(id));
        assert!(!container.remove(id));
        assert!(container.is_empty());
    }
}
