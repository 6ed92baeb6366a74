//! Flash messages carried in the startup URL.
//!
//! A page can land with `?success=...` or `?error=...` in its query string;
//! each becomes one toast and is then stripped so the message does not
//! resurface on reload. The cleaned URL is meant to replace the current
//! history entry in place.

use url::Url;

use crate::types::Kind;

/// Query parameters recognized at startup, scanned in this order.
pub const FLASH_PARAMS: [(&str, Kind); 2] = [("success", Kind::Success), ("error", Kind::Error)];

/// One pending message extracted from the URL.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Flash {
    pub message: String,
    pub kind: Kind,
}

/// Extract pending flash messages from `url`, stripping the consumed
/// parameters in place.
///
/// For each recognized parameter the first value wins. An empty first value
/// is neither shown nor stripped. When a parameter is consumed, all of its
/// occurrences are removed; every other pair keeps its position.
pub fn drain(url: &mut Url) -> Vec<Flash> {
    let mut flashes = Vec::new();
    for (name, kind) in FLASH_PARAMS {
        let first = url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned());
        if let Some(message) = first {
            if message.is_empty() {
                continue;
            }
            flashes.push(Flash { message, kind });
            remove_param(url, name);
        }
    }
    flashes
}

/// Delete every occurrence of one named query parameter, leaving the rest
/// of the query untouched.
pub fn remove_param(url: &mut Url, name: &str) {
    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != name)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    if retained.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(retained);
    }
}

#[cfg(test)]
mod tests {
    use super::{Flash, drain, remove_param};
    use crate::types::Kind;
    use url::Url;

    fn url(s: &str) -> Url {
        match Url::parse(s) {
            Ok(url) => url,
            Err(err) => panic!("test url should parse: {err}"),
        }
    }

    #[test]
    fn drains_both_params_and_preserves_the_rest() {
        let mut location = url("https://app.example/ships?success=A&error=B&foo=1");
        let flashes = drain(&mut location);
        assert_eq!(
            flashes,
            vec![
                Flash {
                    message: "A".to_string(),
                    kind: Kind::Success
                },
                Flash {
                    message: "B".to_string(),
                    kind: Kind::Error
                },
            ]
        );
        assert_eq!(location.as_str(), "https://app.example/ships?foo=1");
    }

    #[test]
    fn empty_value_is_neither_shown_nor_stripped() {
        let mut location = url("https://app.example/?success=&foo=1");
        assert!(drain(&mut location).is_empty());
        assert_eq!(location.query(), Some("success=&foo=1"));
    }

    #[test]
    fn first_value_wins_and_all_occurrences_are_removed() {
        let mut location = url("https://app.example/?success=first&success=second");
        let flashes = drain(&mut location);
        assert_eq!(flashes.len(), 1);
        assert_eq!(flashes[0].message, "first");
        assert_eq!(location.query(), None);
    }

    #[test]
    fn query_disappears_when_last_param_is_consumed() {
        let mut location = url("https://app.example/dashboard?error=Broken");
        let flashes = drain(&mut location);
        assert_eq!(flashes[0].kind, Kind::Error);
        assert_eq!(location.as_str(), "https://app.example/dashboard");
    }

    #[test]
    fn percent_encoded_messages_are_decoded() {
        let mut location = url("https://app.example/?success=Saved%20ship");
        let flashes = drain(&mut location);
        assert_eq!(flashes[0].message, "Saved ship");
    }

    #[test]
    fn remove_param_keeps_other_pairs_in_order() {
        let mut location = url("https://app.example/?a=1&gone=x&b=2&gone=y");
        remove_param(&mut location, "gone");
        assert_eq!(location.query(), Some("a=1&b=2"));
    }

    #[test]
    fn url_without_query_is_untouched() {
        let mut location = url("https://app.example/reports");
        assert!(drain(&mut location).is_empty());
        assert_eq!(location.as_str(), "https://app.example/reports");
    }
}
