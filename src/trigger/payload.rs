use serde::Deserialize;

use crate::types::Kind;

/// Message shown when a detailed payload omits its text.
pub(crate) const FALLBACK_MESSAGE: &str = "Action executed";

/// The polymorphic `showMessage` value carried in a trigger header: either
/// a bare string or an object with optional message and type.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ShowMessage {
    Plain(String),
    Detailed {
        #[serde(default)]
        message: Option<String>,
        #[serde(default, rename = "type")]
        kind: Kind,
    },
}

impl ShowMessage {
    /// Resolve defaults into a displayable message.
    ///
    /// Plain strings are success-kind; an empty plain string counts as
    /// absent. Detailed payloads fall back to a generic message and the
    /// success kind.
    #[must_use]
    pub fn resolve(self) -> Option<(String, Kind)> {
        match self {
            Self::Plain(message) => {
                if message.is_empty() {
                    None
                } else {
                    Some((message, Kind::Success))
                }
            }
            Self::Detailed { message, kind } => {
                let message = message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());
                Some((message, kind))
            }
        }
    }
}
