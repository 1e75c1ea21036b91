//! Injected request header names and fixed values.
//!
//! These names are part of the wire contract with the exam server and must
//! stay stable across releases. Values that derive from the policy (client
//! version/type, config key) are filled in by the request gate.

/// Marks a request as originating from the controlled client.
pub const MARKER: &str = "X-SafeExamBrowser";

/// Fixed value for [`MARKER`].
pub const MARKER_VALUE: &str = "SEB-Linux-MVP";

/// Request-integrity hash. The shipped provider emits a placeholder; see
/// [`RequestHashProvider`](crate::RequestHashProvider).
pub const REQUEST_HASH: &str = "X-SafeExamBrowser-RequestHash";

/// Client version, defaulted from the policy.
pub const CLIENT_VERSION: &str = "X-SafeExamBrowser-ClientVersion";

/// Client type, defaulted from the policy.
pub const CLIENT_TYPE: &str = "X-SafeExamBrowser-ClientType";

/// Config/protocol version constant.
pub const CONFIG_VERSION: &str = "X-SafeExamBrowser-ConfigVersion";

/// Fixed value for [`CONFIG_VERSION`].
pub const CONFIG_VERSION_VALUE: &str = "2";

/// Config key identifying the loaded configuration. Only attached when the
/// policy sets `send_config_key`.
pub const CONFIG_KEY: &str = "X-SafeExamBrowser-ConfigKey";
