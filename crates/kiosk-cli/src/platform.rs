//! Platform idle-inhibition backends.
//!
//! The session D-Bus services are reached by shelling out to `busctl --user`
//! rather than speaking D-Bus in-process; the inhibitor treats any failure
//! (missing binary, no session bus, service not running) as "backend
//! unavailable" and moves down the chain.

use std::process::Command;

use kiosk_shell::{InhibitCookie, InhibitError, InhibitService};

/// Which session service this backend talks to.
#[derive(Debug, Clone, Copy)]
enum ServiceKind {
    /// `org.freedesktop.ScreenSaver` - legacy screen-saver inhibition.
    ScreenSaver,
    /// `org.gnome.SessionManager` - desktop session-manager inhibition.
    GnomeSessionManager,
}

/// GNOME inhibit flag for "the session is idle".
const GNOME_INHIBIT_IDLE: &str = "8";

/// An [`InhibitService`] backed by a `busctl --user call`.
#[derive(Debug)]
pub struct BusctlInhibitService {
    kind: ServiceKind,
}

impl BusctlInhibitService {
    fn new(kind: ServiceKind) -> Box<Self> {
        Box::new(Self { kind })
    }

    fn unavailable(&self, reason: impl Into<String>) -> InhibitError {
        InhibitError::Unavailable {
            service: self.name().to_owned(),
            reason: reason.into(),
        }
    }

    fn call(&self, args: &[&str]) -> Result<String, InhibitError> {
        let output = Command::new("busctl")
            .arg("--user")
            .arg("call")
            .args(args)
            .output()
            .map_err(|e| self.unavailable(format!("failed to spawn busctl: {e}")))?;

        if !output.status.success() {
            return Err(self.unavailable(String::from_utf8_lossy(&output.stderr).trim().to_owned()));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Parse a `u <cookie>` reply.
    fn parse_cookie(&self, reply: &str) -> Result<InhibitCookie, InhibitError> {
        let mut parts = reply.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("u"), Some(value)) => value
                .parse()
                .map_err(|_| self.unavailable(format!("unparsable cookie in reply `{reply}`"))),
            _ => Err(self.unavailable(format!("unexpected reply `{reply}`"))),
        }
    }
}

impl InhibitService for BusctlInhibitService {
    fn name(&self) -> &str {
        match self.kind {
            ServiceKind::ScreenSaver => "org.freedesktop.ScreenSaver",
            ServiceKind::GnomeSessionManager => "org.gnome.SessionManager",
        }
    }

    fn inhibit(&mut self, app_name: &str, reason: &str) -> Result<InhibitCookie, InhibitError> {
        let reply = match self.kind {
            ServiceKind::ScreenSaver => self.call(&[
                "org.freedesktop.ScreenSaver",
                "/ScreenSaver",
                "org.freedesktop.ScreenSaver",
                "Inhibit",
                "ss",
                app_name,
                reason,
            ])?,
            ServiceKind::GnomeSessionManager => self.call(&[
                "org.gnome.SessionManager",
                "/org/gnome/SessionManager",
                "org.gnome.SessionManager",
                "Inhibit",
                "susu",
                app_name,
                "0",
                reason,
                GNOME_INHIBIT_IDLE,
            ])?,
        };
        self.parse_cookie(&reply)
    }

    fn uninhibit(&mut self, cookie: InhibitCookie) -> Result<(), InhibitError> {
        let cookie = cookie.to_string();
        match self.kind {
            ServiceKind::ScreenSaver => self.call(&[
                "org.freedesktop.ScreenSaver",
                "/ScreenSaver",
                "org.freedesktop.ScreenSaver",
                "UnInhibit",
                "u",
                &cookie,
            ])?,
            ServiceKind::GnomeSessionManager => self.call(&[
                "org.gnome.SessionManager",
                "/org/gnome/SessionManager",
                "org.gnome.SessionManager",
                "Uninhibit",
                "u",
                &cookie,
            ])?,
        };
        Ok(())
    }
}

/// The fixed-priority backend chain: screen-saver service first, then the
/// session manager.
#[must_use]
pub fn default_inhibit_chain() -> Vec<Box<dyn InhibitService>> {
    vec![
        BusctlInhibitService::new(ServiceKind::ScreenSaver),
        BusctlInhibitService::new(ServiceKind::GnomeSessionManager),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cookie_reply() {
        let service = BusctlInhibitService::new(ServiceKind::ScreenSaver);
        assert_eq!(service.parse_cookie("u 1684\n").unwrap(), 1684);
    }

    #[test]
    fn test_parse_cookie_rejects_garbage() {
        let service = BusctlInhibitService::new(ServiceKind::ScreenSaver);
        assert!(service.parse_cookie("").is_err());
        assert!(service.parse_cookie("s \"nope\"").is_err());
        assert!(service.parse_cookie("u many").is_err());
    }

    #[test]
    fn test_chain_order() {
        let chain = default_inhibit_chain();
        assert_eq!(chain[0].name(), "org.freedesktop.ScreenSaver");
        assert_eq!(chain[1].name(), "org.gnome.SessionManager");
    }
}
