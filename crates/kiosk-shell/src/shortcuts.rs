//! Keyboard-shortcut suppression.
//!
//! One decision table, [`should_suppress`], consumed from two deliberately
//! redundant subscription points: the [`EventFilter`] sits on the embedded
//! content surface, the [`KeyHandler`] on the host window surface. The two
//! are different event layers; a control implemented at only one of them can
//! be bypassed when content-layer event handling differs by page, so either
//! one missing still yields full protection given the other.
//!
//! `Ctrl+P` and `Ctrl+S` are suppressed in every session type. The escape
//! hatches a display server would otherwise route (`Ctrl+L/T/N/W`,
//! `Ctrl+Shift+I`, `F11`) are suppressed only in the restricted-environment
//! variant. Suppressed events are fully consumed, never forwarded.

use std::fmt;

use tracing::warn;

use kiosk_core::EnforcementEvent;

use crate::kiosk::QuitGesture;
use crate::session::LockdownSession;

/// Key identity, modifier-free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A character key; stored lowercase.
    Char(char),
    F11,
    Escape,
}

/// A key press with its modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCombo {
    pub key: Key,
    pub ctrl: bool,
    pub shift: bool,
}

impl KeyCombo {
    /// A bare key press.
    #[must_use]
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            shift: false,
        }
    }

    /// `Ctrl` + a character key.
    #[must_use]
    pub fn ctrl(c: char) -> Self {
        Self {
            key: Key::Char(c.to_ascii_lowercase()),
            ctrl: true,
            shift: false,
        }
    }

    /// `Ctrl+Shift` + a character key.
    #[must_use]
    pub fn ctrl_shift(c: char) -> Self {
        Self {
            key: Key::Char(c.to_ascii_lowercase()),
            ctrl: true,
            shift: true,
        }
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            write!(f, "Ctrl+")?;
        }
        if self.shift {
            write!(f, "Shift+")?;
        }
        match self.key {
            Key::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            Key::F11 => write!(f, "F11"),
            Key::Escape => write!(f, "Escape"),
        }
    }
}

/// The decision table shared by both subscription layers.
///
/// Returns true when the combo must be swallowed. `Ctrl+P`/`Ctrl+S` are
/// unconditional; the browser-chrome shortcuts only apply under the
/// restricted-environment variant.
#[must_use]
pub fn should_suppress(combo: KeyCombo, restricted: bool) -> bool {
    match combo.key {
        // Print and save: all session types. Shift state is ignored, as is
        // conventional for these chords.
        Key::Char('p' | 's') if combo.ctrl => true,
        // Address bar, new tab, new window, close window.
        Key::Char('l' | 't' | 'n' | 'w') if combo.ctrl && restricted => true,
        // Developer tools.
        Key::Char('i') if combo.ctrl && combo.shift && restricted => true,
        // Fullscreen toggle.
        Key::F11 if restricted => true,
        _ => false,
    }
}

/// What a subscription layer tells the host to do with a key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Deliver the event normally.
    Forward,
    /// Swallow the event; nothing reaches the page or the window manager.
    Consume(EnforcementEvent),
    /// Route to the kiosk state machine as a quit gesture.
    Quit(QuitGesture),
}

fn suppress_action(combo: KeyCombo) -> KeyAction {
    let combo_name = combo.to_string();
    warn!(combo = %combo_name, "shortcut blocked");
    KeyAction::Consume(EnforcementEvent::BlockedShortcut { combo: combo_name })
}

/// Content-surface subscription point. Suppression only; quit gestures are
/// the window layer's business.
#[derive(Debug, Clone, Copy)]
pub struct EventFilter {
    restricted: bool,
}

impl EventFilter {
    #[must_use]
    pub fn new(session: &LockdownSession) -> Self {
        Self {
            restricted: session.restricted_shortcuts(),
        }
    }

    /// Evaluate one key press on the content surface.
    #[must_use]
    pub fn on_key_press(&self, combo: KeyCombo) -> KeyAction {
        if should_suppress(combo, self.restricted) {
            suppress_action(combo)
        } else {
            KeyAction::Forward
        }
    }
}

/// Window-surface subscription point. Routes quit gestures to the state
/// machine when the exit gate is enabled, then applies the same suppression
/// table as the content layer.
#[derive(Debug, Clone, Copy)]
pub struct KeyHandler {
    restricted: bool,
    exit_gate_enabled: bool,
}

impl KeyHandler {
    #[must_use]
    pub fn new(session: &LockdownSession) -> Self {
        Self {
            restricted: session.restricted_shortcuts(),
            exit_gate_enabled: session.quit_password().is_some(),
        }
    }

    /// Evaluate one key press on the window surface.
    #[must_use]
    pub fn on_key_press(&self, combo: KeyCombo) -> KeyAction {
        if self.exit_gate_enabled {
            if combo == KeyCombo::plain(Key::Escape) {
                return KeyAction::Quit(QuitGesture::EscapeKey);
            }
            if combo.key == Key::Char('q') && combo.ctrl {
                return KeyAction::Quit(QuitGesture::CtrlQ);
            }
        }

        if should_suppress(combo, self.restricted) {
            suppress_action(combo)
        } else {
            KeyAction::Forward
        }
    }
}
