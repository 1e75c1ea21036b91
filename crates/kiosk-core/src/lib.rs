//! Kiosk Core - policy model and matching logic for the kiosk lockdown shell.
//!
//! This crate holds the pieces of the lockdown policy that are pure data and
//! pure functions: the immutable [`Policy`] loaded at startup, the domain
//! allow-list matcher shared by the request and navigation gates, the JSON
//! config loader, and the enforcement event taxonomy used for operator logs.
//!
//! Nothing in this crate performs I/O besides [`config::load_from_path`], and
//! nothing here talks to the web engine or the window system.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
mod error;
mod event;
mod matcher;
mod policy;

pub use config::{load_from_path, load_from_str};
pub use error::{ConfigError, PolicyError};
pub use event::EnforcementEvent;
pub use matcher::host_allowed;
pub use policy::{DEFAULT_CLIENT_TYPE, DEFAULT_CLIENT_VERSION, Policy};
