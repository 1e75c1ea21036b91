//! `kiosk run` command implementation.
//!
//! Drives everything the policy core owns for a live session: config load
//! and validation first (any failure exits non-zero before a session
//! exists), then gate construction, idle inhibition and the password-gated
//! exit flow. The embedding web view is an external collaborator; its seams
//! (`InterceptedRequest`, navigation decisions, dialogs) are wired to the
//! controlling terminal here.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use kiosk_gate::{GateDecision, NavigationDecision, NavigationGate, RecordingRequest, RequestGate};
use kiosk_shell::{
    IdleInhibitor, KioskStateMachine, LockdownSession, PasswordPrompt, QuitDisposition,
    QuitGesture, WarningDialog, detect_session_type,
};

use crate::platform::default_inhibit_chain;

const APP_NAME: &str = "kiosk";
const INHIBIT_REASON: &str = "Exam session in progress";

/// Arguments for the `kiosk run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the JSON configuration file.
    #[arg(long, short = 'c')]
    pub config: PathBuf,

    /// Password required to quit the application.
    #[arg(long)]
    pub quit_password: Option<String>,
}

/// Modal text-input prompt on the controlling terminal.
struct ConsolePrompt;

impl PasswordPrompt for ConsolePrompt {
    fn request_password(&mut self, title: &str, label: &str) -> Option<String> {
        eprintln!("{title}");
        eprint!("{label} ");
        let _ = io::stderr().flush();
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None, // EOF = cancelled
            Ok(_) => Some(line.trim_end_matches('\n').to_owned()),
        }
    }
}

/// Modal warning notice on the controlling terminal.
struct ConsoleWarning;

impl WarningDialog for ConsoleWarning {
    fn warn(&mut self, title: &str, message: &str) {
        eprintln!("{title}: {message}");
    }
}

/// Run a lockdown session.
///
/// # Errors
///
/// Returns the config/policy error verbatim when the file cannot be loaded
/// or validated; nothing session-scoped is constructed in that case.
pub fn run(args: RunArgs) -> Result<()> {
    let policy = kiosk_core::load_from_path(&args.config)
        .with_context(|| format!("configuration rejected: {}", args.config.display()))?;

    info!(start_url = %policy.start_url, allowed_domains = ?policy.allowed_domains, "configuration loaded");

    let session = LockdownSession::new(args.quit_password, detect_session_type().as_deref());
    let request_gate = RequestGate::new(&policy);
    let navigation_gate = NavigationGate::new(&policy);
    let mut machine = KioskStateMachine::new(session);

    let presentation = machine.presentation();
    info!(
        fullscreen = presentation.fullscreen,
        frameless = presentation.frameless,
        "window presentation"
    );

    let mut inhibitor = IdleInhibitor::new(default_inhibit_chain());
    inhibitor.start(APP_NAME, INHIBIT_REASON);
    if let Some(mechanism) = inhibitor.active_mechanism() {
        info!(mechanism, "idle inhibition started");
    }

    // Host integration point: an embedding web view would route every
    // outbound request through `request_gate.intercept` and every main-frame
    // transition through `navigation_gate.check_navigation`. Without one,
    // the terminal stands in: lines are probed as destination URLs, `quit`
    // (or a closed stream) delivers the exit gesture.
    eprintln!("session running; enter a URL to probe it, `quit` (or Ctrl+D) to request exit");

    let stdin = io::stdin();
    let mut prompt = ConsolePrompt;
    let mut warning = ConsoleWarning;
    loop {
        let mut line = String::new();
        let eof = matches!(stdin.lock().read_line(&mut line), Ok(0) | Err(_));
        if !eof && line.trim() != "quit" {
            probe_url(line.trim(), &request_gate, &navigation_gate);
            continue;
        }

        match machine.handle_quit_gesture(QuitGesture::CloseRequest, &mut prompt, &mut warning) {
            QuitDisposition::Close => break,
            QuitDisposition::Stay if eof => {
                // Nothing further can arrive on a closed stream.
                anyhow::bail!("input stream closed before exit was granted");
            }
            QuitDisposition::Stay => eprintln!("session continues"),
        }
    }

    inhibitor.stop();
    info!("session closed");
    Ok(())
}

/// Dry-run a destination through both enforcement layers.
fn probe_url(url: &str, request_gate: &RequestGate, navigation_gate: &NavigationGate) {
    if url.is_empty() {
        return;
    }
    let mut request = RecordingRequest::to(url);
    let request_verdict = match request_gate.intercept(&mut request) {
        GateDecision::Allowed => "allowed",
        GateDecision::Blocked(_) => "blocked",
    };
    let navigation_verdict = match navigation_gate.check_navigation(url, true) {
        NavigationDecision::Allow => "allowed",
        NavigationDecision::Block { .. } => "blocked (block page substituted)",
    };
    eprintln!("{url}: request {request_verdict}, navigation {navigation_verdict}");
}
