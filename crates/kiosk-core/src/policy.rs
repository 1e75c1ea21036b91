//! The immutable lockdown policy.
//!
//! A [`Policy`] is produced once by the config loader at startup and shared
//! by reference with the request gate, the navigation gate and the kiosk
//! shell for the lifetime of the process. It is never mutated after load; an
//! invalid policy must never reach gate or shell construction, which the
//! loader guarantees by validating before returning.

use serde::Serialize;
use url::Url;

use crate::error::PolicyError;

/// Client version reported when the config does not set one.
pub const DEFAULT_CLIENT_VERSION: &str = "0.1.0";

/// Client type reported when the config does not set one.
pub const DEFAULT_CLIENT_TYPE: &str = "SEB-Linux";

/// Lockdown policy: start URL, domain allow-list and client identity.
///
/// `allowed_domains` preserves the insertion order of the config document so
/// that the policy echo in the CLI is deterministic; matching itself is
/// order-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    /// Required. Absolute https URL the session starts on.
    pub start_url: String,
    /// Hostnames permitted as request/navigation destinations.
    pub allowed_domains: Vec<String>,
    /// Appended to the engine's default user-agent when set.
    pub user_agent_suffix: Option<String>,
    /// Raw configured value; read through [`Policy::client_version`].
    pub client_version: String,
    /// Raw configured value; read through [`Policy::client_type`].
    pub client_type: String,
    /// Whether the config-key header is attached to allowed requests.
    pub send_config_key: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            start_url: String::new(),
            allowed_domains: Vec::new(),
            user_agent_suffix: None,
            client_version: String::new(),
            client_type: String::new(),
            send_config_key: true,
        }
    }
}

impl Policy {
    /// Validate the policy: `start_url` must be a well-formed absolute URL
    /// with the `https` scheme.
    ///
    /// # Errors
    ///
    /// Returns a [`PolicyError`] naming the first check that failed.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.start_url.is_empty() {
            return Err(PolicyError::EmptyStartUrl);
        }
        let url = Url::parse(&self.start_url).map_err(|source| PolicyError::InvalidStartUrl {
            url: self.start_url.clone(),
            source,
        })?;
        if url.scheme() != "https" {
            return Err(PolicyError::SchemeNotHttps(url.scheme().to_owned()));
        }
        Ok(())
    }

    /// Whether [`Policy::validate`] would succeed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Client version with the defaulting rule applied.
    #[must_use]
    pub fn client_version(&self) -> &str {
        if self.client_version.is_empty() {
            DEFAULT_CLIENT_VERSION
        } else {
            &self.client_version
        }
    }

    /// Client type with the defaulting rule applied.
    #[must_use]
    pub fn client_type(&self) -> &str {
        if self.client_type.is_empty() {
            DEFAULT_CLIENT_TYPE
        } else {
            &self.client_type
        }
    }

    /// Build the user-agent string for the session: the engine's base UA,
    /// plus the configured suffix separated by a single space.
    #[must_use]
    pub fn effective_user_agent(&self, base: &str) -> String {
        match self.user_agent_suffix.as_deref() {
            Some(suffix) if !suffix.is_empty() => format!("{base} {suffix}"),
            _ => base.to_owned(),
        }
    }
}
