//! Kiosk Shell - window/exit lifecycle of the lockdown session.
//!
//! Orthogonal to content filtering: this crate owns the fullscreen/frameless
//! presentation intent, the password-gated close flow, keyboard-shortcut
//! suppression and idle inhibition. The actual window system, dialogs and
//! platform session services are collaborators reached through traits
//! ([`PasswordPrompt`], [`WarningDialog`], [`InhibitService`], [`KeepAlive`]).
//!
//! Everything here is single-threaded and event-driven. The one intentional
//! blocking point is the password prompt: the state machine halts the
//! originating close gesture until the modal dialog resolves. The idle
//! keep-alive timer runs on its own thread and shares no state with the rest
//! of the shell beyond its stop channel.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod idle;
mod kiosk;
mod session;
mod shortcuts;

pub use idle::{
    IdleInhibitor, InhibitCookie, InhibitError, InhibitService, KeepAlive, LoggingKeepAlive,
};
pub use kiosk::{
    KioskState, KioskStateMachine, PasswordPrompt, QuitDisposition, QuitGesture, WarningDialog,
    WindowPresentation,
};
pub use session::{LockdownSession, detect_session_type};
pub use shortcuts::{EventFilter, Key, KeyAction, KeyCombo, KeyHandler, should_suppress};
