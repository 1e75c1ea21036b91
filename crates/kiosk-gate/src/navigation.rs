//! Navigation-level enforcement: top-level page transitions, popups, prints
//! and downloads.

use tracing::warn;
use url::Url;

use kiosk_core::{EnforcementEvent, Policy, host_allowed};

/// In-page behavioral override installed once per page load by the host.
///
/// Suppresses the context menu and text selection. Advisory only, and
/// circumventable with devtools; the request gate remains the primary
/// control.
const SUPPRESSION_SCRIPT: &str = concat!(
    "document.addEventListener('contextmenu', function(e) { e.preventDefault(); return false; });",
    "document.addEventListener('selectstart', function(e) { e.preventDefault(); return false; });",
);

/// Outcome of a top-level navigation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationDecision {
    /// Navigation proceeds.
    Allow,
    /// Navigation is vetoed; the host must render `html` in place of the
    /// destination. No traffic reaches the blocked host.
    Block {
        html: String,
        event: EnforcementEvent,
    },
}

/// Intercepts main-frame navigations and vetoes the user-triggerable escape
/// paths (popups, printing, downloads).
pub struct NavigationGate {
    allowed_domains: Vec<String>,
    start_url: String,
}

impl NavigationGate {
    /// Build a gate from a validated policy.
    #[must_use]
    pub fn new(policy: &Policy) -> Self {
        Self {
            allowed_domains: policy.allowed_domains.clone(),
            start_url: policy.start_url.clone(),
        }
    }

    /// Check one navigation attempt.
    ///
    /// Non-main-frame navigations pass through unconditionally; per-resource
    /// enforcement is the request gate's job. An empty host (internal or
    /// resource-less navigations, e.g. the block page itself) also passes.
    #[must_use]
    pub fn check_navigation(&self, url: &str, is_main_frame: bool) -> NavigationDecision {
        if !is_main_frame {
            return NavigationDecision::Allow;
        }

        let host = Url::parse(url)
            .ok()
            .and_then(|parsed| parsed.host_str().map(str::to_owned))
            .unwrap_or_default();

        if !host.is_empty() && !host_allowed(&host, &self.allowed_domains) {
            warn!(host = %host, url = %url, "blocking navigation to non-allowed domain");
            return NavigationDecision::Block {
                html: self.block_page_html(url),
                event: EnforcementEvent::BlockedNavigation {
                    url: url.to_owned(),
                },
            };
        }

        NavigationDecision::Allow
    }

    /// Secondary window / popup creation is always refused.
    #[must_use]
    pub fn allow_popup(&self) -> bool {
        warn!(event = %EnforcementEvent::BlockedPopup, "popup window refused");
        false
    }

    /// Print requests are always refused. Enforced independently at the
    /// keyboard layer as well; either path alone is insufficient.
    #[must_use]
    pub fn allow_print(&self) -> bool {
        warn!(event = %EnforcementEvent::BlockedPrint, "print request refused");
        false
    }

    /// Downloads are always refused; the host must cancel the transfer.
    #[must_use]
    pub fn allow_download(&self, url: &str) -> bool {
        let event = EnforcementEvent::BlockedDownload {
            url: url.to_owned(),
        };
        warn!(%event, "download refused");
        false
    }

    /// Script the host installs on every page load.
    #[must_use]
    pub fn suppression_script(&self) -> &'static str {
        SUPPRESSION_SCRIPT
    }

    /// Synthesize the block page: the escaped attempted URL plus a one-click
    /// return link back to the start URL.
    #[must_use]
    fn block_page_html(&self, blocked_url: &str) -> String {
        let blocked = html_escape(blocked_url);
        let start = html_escape(&self.start_url);
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Access Restricted</title>
    <style>
        body {{
            font-family: -apple-system, 'Segoe UI', Roboto, Ubuntu, sans-serif;
            display: flex;
            justify-content: center;
            align-items: center;
            min-height: 100vh;
            margin: 0;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            color: #333;
        }}
        .container {{
            background: white;
            border-radius: 12px;
            padding: 40px;
            max-width: 500px;
            box-shadow: 0 10px 40px rgba(0, 0, 0, 0.2);
            text-align: center;
        }}
        h1 {{ margin: 0 0 16px 0; color: #2d3748; font-size: 28px; }}
        p {{ margin: 0 0 32px 0; color: #718096; line-height: 1.6; }}
        .blocked-url {{
            background: #f7fafc;
            border: 1px solid #e2e8f0;
            border-radius: 6px;
            padding: 12px;
            margin: 20px 0;
            font-family: monospace;
            font-size: 14px;
            color: #c53030;
            word-break: break-all;
        }}
        .back-button {{
            background: #667eea;
            color: white;
            border-radius: 6px;
            padding: 14px 32px;
            font-size: 16px;
            font-weight: 600;
            text-decoration: none;
            display: inline-block;
        }}
    </style>
</head>
<body>
    <div class="container">
        <h1>Access Restricted</h1>
        <p>This domain is not allowed in the current exam session.</p>
        <div class="blocked-url">{blocked}</div>
        <a href="{start}" class="back-button">Return to Exam</a>
    </div>
</body>
</html>
"#
        )
    }
}

/// Escape a string for embedding in HTML text or attribute context.
///
/// `&` is replaced first so already-escaped output is not double-mangled.
#[must_use]
pub fn html_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
