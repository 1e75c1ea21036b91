//! `kiosk explain` command implementation.
//!
//! Renders what each enforcement layer would do with a destination URL:
//! the request gate's block/inject outcome with the exact header set, and
//! the navigation gate's allow/block verdict for a main-frame transition.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use kiosk_gate::{
    GateDecision, NavigationDecision, NavigationGate, RecordingRequest, RequestGate,
};

/// Arguments for the `kiosk explain` command.
#[derive(Args, Debug)]
pub struct ExplainArgs {
    /// Path to the JSON configuration file.
    #[arg(long, short = 'c')]
    pub config: PathBuf,

    /// Destination URL to evaluate.
    #[arg(long, short = 'u')]
    pub url: String,
}

/// Run the explain command.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded.
pub fn run(args: &ExplainArgs) -> Result<()> {
    let policy = kiosk_core::load_from_path(&args.config)
        .with_context(|| format!("configuration rejected: {}", args.config.display()))?;

    let request_gate = RequestGate::new(&policy);
    let navigation_gate = NavigationGate::new(&policy);

    println!("url: {}", args.url);

    let mut request = RecordingRequest::to(&args.url);
    match request_gate.intercept(&mut request) {
        GateDecision::Blocked(event) => {
            println!("request layer:    blocked ({event})");
        }
        GateDecision::Allowed => {
            println!("request layer:    allowed, headers injected:");
            for (name, value) in &request.headers {
                println!("    {name}: {value}");
            }
        }
    }

    match navigation_gate.check_navigation(&args.url, true) {
        NavigationDecision::Block { event, .. } => {
            println!("navigation layer: blocked ({event}); block page substituted");
        }
        NavigationDecision::Allow => {
            println!("navigation layer: allowed");
        }
    }

    Ok(())
}
