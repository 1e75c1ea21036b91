//! Enforcement event taxonomy.
//!
//! Every blocked action produces one of these. They are never fatal: blocked
//! requests and resources stay silent toward the page, blocked top-level
//! navigations additionally drive the user-visible block page, and all of
//! them are logged for the operator.

use std::fmt;

use serde::Serialize;

/// A policy enforcement outcome worth reporting to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EnforcementEvent {
    /// An outbound request to a non-allowed host was dropped.
    BlockedRequest { host: String },
    /// A top-level navigation to a non-allowed host was vetoed.
    BlockedNavigation { url: String },
    /// A secondary window / popup creation was refused.
    BlockedPopup,
    /// A print request was refused.
    BlockedPrint,
    /// A download was cancelled.
    BlockedDownload { url: String },
    /// A keyboard shortcut was swallowed.
    BlockedShortcut { combo: String },
}

impl fmt::Display for EnforcementEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlockedRequest { host } => write!(f, "blocked request to host `{host}`"),
            Self::BlockedNavigation { url } => write!(f, "blocked navigation to `{url}`"),
            Self::BlockedPopup => write!(f, "blocked popup window"),
            Self::BlockedPrint => write!(f, "blocked print request"),
            Self::BlockedDownload { url } => write!(f, "blocked download of `{url}`"),
            Self::BlockedShortcut { combo } => write!(f, "blocked shortcut {combo}"),
        }
    }
}
