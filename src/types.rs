use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a single toast element on the surface.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ToastId(Uuid);

impl ToastId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ToastId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Kind of a notification. Determines the glyph rendered next to the
/// message; everything downstream of ingestion is one of these three.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    #[default]
    Success,
    Error,
    Info,
}

impl Kind {
    /// Map an external label onto a kind. Matching is exact, so `"ERROR"`
    /// is not an error label; anything but the two recognized labels
    /// renders as informational.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "success" => Self::Success,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }

    /// Fixed glyph shown next to the message.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Success => "\u{2705}",
            Self::Error => "\u{274c}",
            Self::Info => "\u{2139}\u{fe0f}",
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_label(s))
    }
}

// Lenient on purpose: trigger payloads carry arbitrary labels and must
// never fail to decode because of one.
impl<'de> Deserialize<'de> for Kind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}
