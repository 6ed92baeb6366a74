use reqwest::header::HeaderMap;
use serde_json::Value;
use tracing::{debug, warn};

use crate::types::Kind;

use super::payload::ShowMessage;

/// Trigger headers inspected after each partial-page update, in order.
pub const TRIGGER_HEADERS: [&str; 3] = [
    "hx-trigger",
    "hx-trigger-after-swap",
    "hx-trigger-after-settle",
];

/// Collect the messages signaled by a response's trigger headers.
///
/// Each header present may independently contribute one message. A header
/// that is not valid UTF-8, not valid JSON, or whose `showMessage` value is
/// unsupported is logged and skipped; the scan itself never fails.
pub fn scan(headers: &HeaderMap) -> Vec<(String, Kind)> {
    let mut messages = Vec::new();
    for name in TRIGGER_HEADERS {
        let Some(value) = headers.get(name) else {
            continue;
        };
        let raw = match value.to_str() {
            Ok(raw) => raw,
            Err(err) => {
                warn!(header = name, error = %err, "trigger header is not valid UTF-8, skipping");
                continue;
            }
        };
        let triggers: Value = match serde_json::from_str(raw) {
            Ok(triggers) => triggers,
            Err(err) => {
                warn!(header = name, error = %err, "failed to parse trigger header, skipping");
                continue;
            }
        };
        let Some(show) = triggers.get("showMessage") else {
            debug!(header = name, "trigger header carries no showMessage");
            continue;
        };
        if show.is_null() {
            continue;
        }
        match serde_json::from_value::<ShowMessage>(show.clone()) {
            Ok(payload) => {
                if let Some((message, kind)) = payload.resolve() {
                    debug!(header = name, %kind, message = %message, "trigger header requested a toast");
                    messages.push((message, kind));
                }
            }
            Err(err) => {
                warn!(header = name, error = %err, "unsupported showMessage payload, skipping");
            }
        }
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::scan;
    use crate::types::Kind;
    use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn plain_show_message_is_a_success_toast() {
        let map = headers(&[("hx-trigger", r#"{"showMessage":"Done"}"#)]);
        assert_eq!(scan(&map), vec![("Done".to_string(), Kind::Success)]);
    }

    #[test]
    fn detailed_show_message_carries_its_kind() {
        let map = headers(&[(
            "hx-trigger",
            r#"{"showMessage":{"message":"Oops","type":"error"}}"#,
        )]);
        assert_eq!(scan(&map), vec![("Oops".to_string(), Kind::Error)]);
    }

    #[test]
    fn malformed_json_is_skipped_and_others_still_scan() {
        let map = headers(&[
            ("hx-trigger", "not-json"),
            ("hx-trigger-after-settle", r#"{"showMessage":"Still here"}"#),
        ]);
        assert_eq!(scan(&map), vec![("Still here".to_string(), Kind::Success)]);
    }

    #[test]
    fn each_header_contributes_independently() {
        let map = headers(&[
            ("hx-trigger", r#"{"showMessage":"One"}"#),
            ("hx-trigger-after-swap", r#"{"showMessage":"Two"}"#),
            ("hx-trigger-after-settle", r#"{"showMessage":"Three"}"#),
        ]);
        assert_eq!(scan(&map).len(), 3);
    }

    #[test]
    fn unrelated_triggers_are_ignored() {
        let map = headers(&[("hx-trigger", r#"{"refreshTable":true}"#)]);
        assert!(scan(&map).is_empty());
    }

    #[test]
    fn null_show_message_is_ignored() {
        let map = headers(&[("hx-trigger", r#"{"showMessage":null}"#)]);
        assert!(scan(&map).is_empty());
    }

    #[test]
    fn non_utf8_header_is_skipped() {
        let mut map = HeaderMap::new();
        let value = match HeaderValue::from_bytes(b"\xff\xfe") {
            Ok(value) => value,
            Err(err) => panic!("opaque header value should build: {err}"),
        };
        map.insert(HeaderName::from_static("hx-trigger"), value);
        assert!(scan(&map).is_empty());
    }

    #[test]
    fn absent_headers_scan_to_nothing() {
        assert!(scan(&HeaderMap::new()).is_empty());
    }
}
