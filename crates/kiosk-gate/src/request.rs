//! Request-level enforcement: block or annotate every outbound request.

use tracing::warn;
use url::Url;

use kiosk_core::{EnforcementEvent, Policy, host_allowed};

use crate::headers;

/// The outbound request object handed to the gate by the network layer.
///
/// The gate mutates headers in place on allowed requests and marks blocked
/// ones; it never produces a response. Blocking is silent toward the page:
/// the connection simply never completes.
pub trait InterceptedRequest {
    /// Full destination URL of the request.
    fn url(&self) -> &str;
    /// Set (or overwrite) an outgoing header.
    fn set_header(&mut self, name: &str, value: &str);
    /// Prevent the request from being dispatched.
    fn block(&mut self);
}

/// Pluggable provider for the request-integrity-hash header value.
///
/// A real deployment must compute a cryptographic hash over request and
/// session material here. Modeled as a seam rather than a hard-coded value
/// so the gap stays visible instead of silently load-bearing.
pub trait RequestHashProvider: Send + Sync {
    /// Hash value for the given destination URL.
    fn request_hash(&self, url: &str) -> String;
}

/// The shipped stub provider: a fixed placeholder string.
#[derive(Debug, Default)]
pub struct PlaceholderHashProvider;

impl RequestHashProvider for PlaceholderHashProvider {
    fn request_hash(&self, _url: &str) -> String {
        "placeholder-stub-request-hash".to_owned()
    }
}

/// [`InterceptedRequest`] adapter that records what the gate did to it.
///
/// Used by diagnostics (the CLI `explain` path) and by hosts that want to
/// dry-run a URL against the gate without a live request object.
#[derive(Debug, Default, Clone)]
pub struct RecordingRequest {
    url: String,
    /// Headers in injection order.
    pub headers: Vec<(String, String)>,
    /// Whether the gate blocked the request.
    pub blocked: bool,
}

impl RecordingRequest {
    /// A recording request aimed at `url`.
    #[must_use]
    pub fn to(url: &str) -> Self {
        Self {
            url: url.to_owned(),
            ..Self::default()
        }
    }

    /// Value of an injected header, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

impl InterceptedRequest for RecordingRequest {
    fn url(&self) -> &str {
        &self.url
    }

    fn set_header(&mut self, name: &str, value: &str) {
        self.headers.push((name.to_owned(), value.to_owned()));
    }

    fn block(&mut self) {
        self.blocked = true;
    }
}

/// Outcome of a request interception.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Request proceeds, headers injected.
    Allowed,
    /// Request was blocked; carries the event for operator reporting.
    Blocked(EnforcementEvent),
}

/// Intercepts every outbound request before dispatch.
pub struct RequestGate {
    allowed_domains: Vec<String>,
    client_version: String,
    client_type: String,
    send_config_key: bool,
    config_key: String,
    hash_provider: Box<dyn RequestHashProvider>,
}

impl RequestGate {
    /// Stub config key until real config-key derivation lands.
    const STUB_CONFIG_KEY: &'static str = "stub-value";

    /// Build a gate from a validated policy, using the placeholder hash
    /// provider.
    #[must_use]
    pub fn new(policy: &Policy) -> Self {
        Self::with_hash_provider(policy, Box::new(PlaceholderHashProvider))
    }

    /// Build a gate with a custom hash provider.
    #[must_use]
    pub fn with_hash_provider(policy: &Policy, hash_provider: Box<dyn RequestHashProvider>) -> Self {
        Self {
            allowed_domains: policy.allowed_domains.clone(),
            client_version: policy.client_version().to_owned(),
            client_type: policy.client_type().to_owned(),
            send_config_key: policy.send_config_key,
            config_key: Self::STUB_CONFIG_KEY.to_owned(),
            hash_provider,
        }
    }

    /// Evaluate one outbound request.
    ///
    /// Non-allowed hosts are blocked entirely and carry no injected headers.
    /// Allowed hosts get exactly the defined header set, with the config-key
    /// header present iff the policy enables it. Never fails and never
    /// blocks the calling thread.
    pub fn intercept(&self, request: &mut dyn InterceptedRequest) -> GateDecision {
        let url = request.url().to_owned();
        let host = Url::parse(&url)
            .ok()
            .and_then(|parsed| parsed.host_str().map(str::to_owned))
            .unwrap_or_default();

        if !host_allowed(&host, &self.allowed_domains) {
            warn!(host = %host, "blocking request to non-allowed domain");
            request.block();
            return GateDecision::Blocked(EnforcementEvent::BlockedRequest { host });
        }

        request.set_header(headers::MARKER, headers::MARKER_VALUE);
        request.set_header(headers::REQUEST_HASH, &self.hash_provider.request_hash(&url));
        request.set_header(headers::CLIENT_VERSION, &self.client_version);
        request.set_header(headers::CLIENT_TYPE, &self.client_type);
        request.set_header(headers::CONFIG_VERSION, headers::CONFIG_VERSION_VALUE);
        if self.send_config_key {
            request.set_header(headers::CONFIG_KEY, &self.config_key);
        }

        GateDecision::Allowed
    }
}
