use std::time::Duration;

pub(super) const fn default_show_duration() -> Duration {
    Duration::from_millis(4000)
}

pub(super) const fn default_transition() -> Duration {
    Duration::from_millis(300)
}

pub(super) const fn default_frame_interval() -> Duration {
    Duration::from_millis(16)
}

pub(super) const fn default_queue_capacity() -> usize {
    64
}

pub(super) fn default_container_id() -> String {
    "toast-container".to_string()
}
