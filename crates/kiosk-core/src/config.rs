//! JSON config loading.
//!
//! The loader walks the document manually instead of deriving `Deserialize`
//! so that every present-but-mistyped field yields a field-specific error,
//! and so that non-string entries inside `allowedDomains` can be skipped
//! silently rather than failing the whole load. A [`Policy`] is either fully
//! decoded and validated or discarded; no partial application.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::ConfigError;
use crate::policy::Policy;

/// Load and validate a policy from a JSON file on disk.
///
/// # Errors
///
/// Returns a [`ConfigError`] for unreadable files, malformed JSON, wrong
/// field shapes, or a `startUrl` that fails URL/scheme validation.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Policy, ConfigError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_owned(),
        source,
    })?;
    load_from_str(&raw)
}

/// Load and validate a policy from a JSON string.
///
/// # Errors
///
/// Same failure modes as [`load_from_path`], minus the file read.
pub fn load_from_str(raw: &str) -> Result<Policy, ConfigError> {
    let doc: Value = serde_json::from_str(raw)?;
    let root = doc.as_object().ok_or(ConfigError::NotAnObject)?;

    let mut policy = Policy::default();

    policy.start_url = required_str(root, "startUrl")?.to_owned();

    if let Some(value) = root.get("allowedDomains") {
        let entries = value.as_array().ok_or(ConfigError::WrongType {
            field: "allowedDomains",
            expected: "an array",
        })?;
        // Non-string entries are skipped without error.
        policy.allowed_domains = entries
            .iter()
            .filter_map(|entry| entry.as_str().map(str::to_owned))
            .collect();
    }

    if let Some(suffix) = optional_str(root, "userAgentSuffix")? {
        policy.user_agent_suffix = Some(suffix.to_owned());
    }
    if let Some(version) = optional_str(root, "clientVersion")? {
        policy.client_version = version.to_owned();
    }
    if let Some(client_type) = optional_str(root, "clientType")? {
        policy.client_type = client_type.to_owned();
    }

    if let Some(value) = root.get("sendConfigKey") {
        policy.send_config_key = value.as_bool().ok_or(ConfigError::WrongType {
            field: "sendConfigKey",
            expected: "a boolean",
        })?;
    }

    policy.validate()?;
    Ok(policy)
}

fn required_str<'a>(
    root: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, ConfigError> {
    let value = root.get(field).ok_or(ConfigError::MissingField(field))?;
    value.as_str().ok_or(ConfigError::WrongType {
        field,
        expected: "a string",
    })
}

fn optional_str<'a>(
    root: &'a Map<String, Value>,
    field: &'static str,
) -> Result<Option<&'a str>, ConfigError> {
    match root.get(field) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(Some)
            .ok_or(ConfigError::WrongType {
                field,
                expected: "a string",
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PolicyError;

    #[test]
    fn test_minimal_valid_config() {
        let policy = load_from_str(r#"{ "startUrl": "https://exam.example.com" }"#).unwrap();
        assert_eq!(policy.start_url, "https://exam.example.com");
        assert!(policy.allowed_domains.is_empty());
        assert!(policy.send_config_key);
        assert_eq!(policy.client_version(), "0.1.0");
        assert_eq!(policy.client_type(), "SEB-Linux");
    }

    #[test]
    fn test_full_config() {
        let policy = load_from_str(
            r#"{
                "startUrl": "https://exam.example.com/login",
                "allowedDomains": ["example.com", "cdn.example.net"],
                "userAgentSuffix": "SEB/3.0",
                "clientVersion": "1.2.3",
                "clientType": "SEB-Custom",
                "sendConfigKey": false
            }"#,
        )
        .unwrap();
        assert_eq!(policy.allowed_domains, ["example.com", "cdn.example.net"]);
        assert_eq!(policy.user_agent_suffix.as_deref(), Some("SEB/3.0"));
        assert_eq!(policy.client_version(), "1.2.3");
        assert_eq!(policy.client_type(), "SEB-Custom");
        assert!(!policy.send_config_key);
    }

    #[test]
    fn test_missing_start_url() {
        let err = load_from_str(r#"{ "allowedDomains": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("startUrl")));
        assert!(err.to_string().contains("startUrl"));
    }

    #[test]
    fn test_start_url_wrong_type() {
        let err = load_from_str(r#"{ "startUrl": 42 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::WrongType {
                field: "startUrl",
                ..
            }
        ));
    }

    #[test]
    fn test_empty_start_url_rejected() {
        let err = load_from_str(r#"{ "startUrl": "" }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Policy(PolicyError::EmptyStartUrl)
        ));
    }

    #[test]
    fn test_non_https_scheme_rejected() {
        let err = load_from_str(r#"{ "startUrl": "http://exam.example.com" }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Policy(PolicyError::SchemeNotHttps(_))
        ));
    }

    #[test]
    fn test_send_config_key_wrong_type() {
        let err = load_from_str(
            r#"{ "startUrl": "https://x.com", "sendConfigKey": "yes" }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("sendConfigKey"));
    }

    #[test]
    fn test_allowed_domains_wrong_type() {
        let err = load_from_str(
            r#"{ "startUrl": "https://x.com", "allowedDomains": "example.com" }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("allowedDomains"));
    }

    #[test]
    fn test_non_string_domain_entries_skipped() {
        let policy = load_from_str(
            r#"{
                "startUrl": "https://x.com",
                "allowedDomains": ["example.com", 7, null, "test.org", {"a": 1}]
            }"#,
        )
        .unwrap();
        assert_eq!(policy.allowed_domains, ["example.com", "test.org"]);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            load_from_str("{ not json").unwrap_err(),
            ConfigError::Parse(_)
        ));
    }

    #[test]
    fn test_root_not_an_object() {
        assert!(matches!(
            load_from_str(r#"["https://x.com"]"#).unwrap_err(),
            ConfigError::NotAnObject
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_from_path("/nonexistent/kiosk.json").unwrap_err(),
            ConfigError::Read { .. }
        ));
    }
}
