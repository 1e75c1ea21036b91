//! Domain allow-list matching.
//!
//! One pure function shared by the request gate and the navigation gate, so
//! both enforcement layers cannot drift apart. A host is allowed iff it
//! equals an allow-list entry exactly or ends with `"." + entry`, which
//! admits arbitrary subdomains of an allowed parent domain but never the
//! parent via a subdomain entry.
//!
//! The function is deliberately total and side-effect free: it runs on every
//! outbound request and every top-level navigation and must decide in O(n)
//! over the allow-list without failing or blocking.
//!
//! Matching is byte-for-byte: no case folding and no IDN/punycode
//! normalization is performed here. Callers are expected to pass the host
//! component as extracted by the URL parser. See the case-sensitivity test
//! below, which pins down the current unnormalized behavior.

/// Check whether `host` is admitted by the allow-list.
#[must_use]
pub fn host_allowed(host: &str, allow_list: &[impl AsRef<str>]) -> bool {
    allow_list.iter().any(|entry| {
        let entry = entry.as_ref();
        host == entry
            || host
                .strip_suffix(entry)
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}

#[cfg(test)]
mod tests {
    use super::host_allowed;

    #[test]
    fn test_exact_match() {
        assert!(host_allowed("example.com", &["example.com"]));
    }

    #[test]
    fn test_subdomain_of_allowed_parent() {
        assert!(host_allowed("cdn.example.com", &["example.com"]));
        assert!(host_allowed("a.b.example.com", &["example.com"]));
    }

    #[test]
    fn test_parent_not_admitted_by_subdomain_entry() {
        assert!(!host_allowed("example.com", &["cdn.example.com"]));
    }

    #[test]
    fn test_suffix_without_dot_boundary() {
        // "notexample.com" ends with "example.com" but not ".example.com".
        assert!(!host_allowed("notexample.com", &["example.com"]));
    }

    #[test]
    fn test_empty_allow_list() {
        assert!(!host_allowed("example.com", &[] as &[&str]));
    }

    #[test]
    fn test_unrelated_host() {
        assert!(!host_allowed("evil.com", &["example.com", "test.org"]));
    }

    #[test]
    fn test_second_entry_matches() {
        assert!(host_allowed("sub.test.org", &["example.com", "test.org"]));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        // No case folding is applied: mixed-case hosts do not match a
        // lowercase entry. Pinned on purpose so a future normalization
        // change is a conscious one.
        assert!(!host_allowed("Example.com", &["example.com"]));
        assert!(!host_allowed("cdn.EXAMPLE.com", &["example.com"]));
    }

    #[test]
    fn test_empty_host_never_matches_nonempty_entries() {
        assert!(!host_allowed("", &["example.com"]));
    }
}
