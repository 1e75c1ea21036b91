//! Kiosk Gate - the two enforcement layers of the lockdown shell.
//!
//! Domain policy is enforced twice, from the same pure matcher in
//! `kiosk-core`:
//!
//! 1. **[`RequestGate`]**: runs on every outbound network request. Blocks
//!    non-allowed hosts before any bytes are sent and injects the
//!    identification headers on allowed ones. This is the primary control.
//! 2. **[`NavigationGate`]**: runs on every top-level (main-frame)
//!    navigation, the action a user can trigger directly. Vetoes non-allowed
//!    destinations and substitutes a block page, refuses popups, prints and
//!    downloads. Defense in depth over the request layer, and the only layer
//!    that produces user-visible feedback.
//!
//! Both gates are synchronous and decide within the intercept call; neither
//! performs I/O. The web engine itself is a collaborator reached through the
//! [`InterceptedRequest`] seam and the decisions returned to the host.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod headers;
mod navigation;
mod request;

pub use navigation::{NavigationDecision, NavigationGate, html_escape};
pub use request::{
    GateDecision, InterceptedRequest, PlaceholderHashProvider, RecordingRequest, RequestGate,
    RequestHashProvider,
};
