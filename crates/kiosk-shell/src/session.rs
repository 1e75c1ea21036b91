//! Runtime lockdown session state.

use tracing::debug;

/// Session-type value that enables the restricted-shortcut variant.
const RESTRICTED_SESSION_TYPE: &str = "x11";

/// Mutable-by-latch session context owned by the kiosk state machine.
///
/// Deliberately an explicit value passed around, never ambient global state.
/// `password_verified` is the only field with a write lifecycle: it latches
/// true exactly once, on a successful password check, and never resets for
/// the rest of the session.
#[derive(Debug, Clone)]
pub struct LockdownSession {
    quit_password: Option<String>,
    password_verified: bool,
    restricted_shortcuts: bool,
}

impl LockdownSession {
    /// Create a session.
    ///
    /// An empty quit password means the exit gate is disabled. The
    /// restricted-shortcut flag is computed once here from the session-type
    /// signal and is immutable thereafter.
    #[must_use]
    pub fn new(quit_password: Option<String>, session_type: Option<&str>) -> Self {
        let quit_password = quit_password.filter(|p| !p.is_empty());
        let restricted_shortcuts =
            session_type.is_some_and(|s| s.eq_ignore_ascii_case(RESTRICTED_SESSION_TYPE));

        if restricted_shortcuts {
            debug!("restricted session detected - enabling shortcut suppression");
        }
        if quit_password.is_some() {
            debug!("quit password protection enabled");
        }

        Self {
            quit_password,
            password_verified: false,
            restricted_shortcuts,
        }
    }

    /// The configured quit password, if the exit gate is enabled.
    #[must_use]
    pub fn quit_password(&self) -> Option<&str> {
        self.quit_password.as_deref()
    }

    /// Whether a correct password has been entered this session.
    #[must_use]
    pub fn password_verified(&self) -> bool {
        self.password_verified
    }

    /// Latch the password-verified flag. One-way; there is no reset.
    pub fn mark_password_verified(&mut self) {
        self.password_verified = true;
    }

    /// Whether the restricted-shortcut variant is active.
    #[must_use]
    pub fn restricted_shortcuts(&self) -> bool {
        self.restricted_shortcuts
    }
}

/// Read the session-type signal from the environment.
///
/// This is the one environment read the shell performs; callers that need
/// determinism (tests, the CLI `explain` path) pass the value to
/// [`LockdownSession::new`] directly instead.
#[must_use]
pub fn detect_session_type() -> Option<String> {
    std::env::var("XDG_SESSION_TYPE").ok().filter(|s| !s.is_empty())
}
