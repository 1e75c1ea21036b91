//! Error types for config loading and policy validation.
//!
//! The two failure domains are deliberately separate so operators can tell
//! "bad file" from "bad policy": [`ConfigError`] covers unreadable files,
//! malformed JSON and wrong field shapes, while [`PolicyError`] covers a
//! structurally fine document whose `startUrl` fails URL/scheme checks.
//! Both are fatal to startup and neither is ever partially applied.

use std::path::PathBuf;

use thiserror::Error;

/// Failure while loading or decoding the JSON configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read from disk.
    #[error("failed to read config file `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The top-level JSON value is not an object.
    #[error("root JSON element is not an object")]
    NotAnObject,

    /// A required field is absent.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A present field has the wrong JSON type.
    #[error("field `{field}` must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    /// The document decoded fine but the resulting policy is invalid.
    #[error(transparent)]
    Policy(#[from] PolicyError),
}

/// Failure while validating a decoded [`Policy`](crate::Policy).
#[derive(Debug, Error)]
pub enum PolicyError {
    /// `startUrl` is present but empty.
    #[error("startUrl cannot be empty")]
    EmptyStartUrl,

    /// `startUrl` does not parse as an absolute URL.
    #[error("invalid startUrl `{url}`: {source}")]
    InvalidStartUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// `startUrl` parses but does not use the https scheme.
    #[error("startUrl must use the https scheme, got `{0}`")]
    SchemeNotHttps(String),
}
