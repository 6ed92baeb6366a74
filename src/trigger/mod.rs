//! Ingestion of HTMX-style trigger response headers.
//!
//! After a partial-page update finishes, the response headers may carry a
//! JSON-encoded `showMessage` instruction. Parsing is defensive throughout:
//! a malformed header is logged and skipped, never surfaced.

pub(crate) mod headers;
pub(crate) mod payload;

pub use headers::{TRIGGER_HEADERS, scan};
pub use payload::ShowMessage;
