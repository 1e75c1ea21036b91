//! The kiosk window/exit state machine.
//!
//! ```text
//! Running ──quit gesture, password configured & unverified──▶ AwaitingQuitPassword
//!    ▲                                                              │
//!    │◀──────────────── wrong / cancelled password ─────────────────┤
//!    │                                                              │
//!    └──quit gesture, no password or latch set──▶ Closing ◀─correct─┘
//! ```
//!
//! `Closing` is terminal. The prompt step is the shell's one intentional
//! UI-blocking suspension point: the originating gesture halts until the
//! modal dialog resolves, which is acceptable because exactly one exit
//! gesture can be in flight at a time.

use tracing::{debug, warn};

use crate::session::LockdownSession;

/// States of the kiosk lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KioskState {
    /// Fullscreen, frameless, shortcuts suppressed, idle inhibited.
    Running,
    /// A quit gesture is being resolved by the password prompt.
    AwaitingQuitPassword,
    /// Exit granted; the host tears the window down.
    Closing,
}

/// User actions that can end the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuitGesture {
    /// Window-manager close request.
    CloseRequest,
    /// `Escape` key.
    EscapeKey,
    /// `Ctrl+Q`.
    CtrlQ,
}

/// What the host should do with the originating close event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuitDisposition {
    /// Accept the close; the session ends.
    Close,
    /// Ignore the close; the window stays up.
    Stay,
}

/// Modal text-input prompt collaborator. Returns `None` when cancelled.
pub trait PasswordPrompt {
    fn request_password(&mut self, title: &str, label: &str) -> Option<String>;
}

/// Modal warning notice collaborator.
pub trait WarningDialog {
    fn warn(&mut self, title: &str, message: &str);
}

/// Window presentation the host must apply while the machine is `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowPresentation {
    pub fullscreen: bool,
    pub frameless: bool,
}

/// Owns the lockdown session and reconciles close gestures against the
/// password gate.
#[derive(Debug)]
pub struct KioskStateMachine {
    session: LockdownSession,
    state: KioskState,
}

impl KioskStateMachine {
    /// Create the machine in `Running`.
    #[must_use]
    pub fn new(session: LockdownSession) -> Self {
        Self {
            session,
            state: KioskState::Running,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> KioskState {
        self.state
    }

    /// The session context the machine owns.
    #[must_use]
    pub fn session(&self) -> &LockdownSession {
        &self.session
    }

    /// Presentation is fixed for the whole session.
    #[must_use]
    pub fn presentation(&self) -> WindowPresentation {
        WindowPresentation {
            fullscreen: true,
            frameless: true,
        }
    }

    /// Resolve one quit gesture, prompting for the password when one is
    /// configured and not yet verified.
    ///
    /// A correct entry latches the session and transitions to `Closing`; a
    /// wrong entry surfaces a warning and returns to `Running`; a cancelled
    /// prompt returns to `Running` silently. Once the latch is set (or no
    /// password is configured) every gesture closes directly.
    pub fn handle_quit_gesture(
        &mut self,
        gesture: QuitGesture,
        prompt: &mut dyn PasswordPrompt,
        warning: &mut dyn WarningDialog,
    ) -> QuitDisposition {
        match self.state {
            // Re-entrant gestures while a prompt is open are not a
            // supported scenario; treat them as a no-op.
            KioskState::AwaitingQuitPassword => return QuitDisposition::Stay,
            KioskState::Closing => return QuitDisposition::Close,
            KioskState::Running => {}
        }

        debug!(?gesture, "quit gesture");

        let Some(expected) = self.session.quit_password().map(str::to_owned) else {
            self.state = KioskState::Closing;
            return QuitDisposition::Close;
        };

        if self.session.password_verified() {
            self.state = KioskState::Closing;
            return QuitDisposition::Close;
        }

        self.state = KioskState::AwaitingQuitPassword;
        let entered = prompt.request_password(
            "Quit Password Required",
            "Enter password to quit the application:",
        );

        match entered {
            Some(ref candidate) if *candidate == expected => {
                self.session.mark_password_verified();
                self.state = KioskState::Closing;
                QuitDisposition::Close
            }
            Some(_) => {
                warn!("quit password rejected");
                warning.warn(
                    "Incorrect Password",
                    "The password you entered is incorrect. The application will not close.",
                );
                self.state = KioskState::Running;
                QuitDisposition::Stay
            }
            None => {
                debug!("quit password prompt cancelled");
                self.state = KioskState::Running;
                QuitDisposition::Stay
            }
        }
    }
}
