//! `kiosk check` command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use kiosk_core::Policy;

/// Arguments for the `kiosk check` command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the JSON configuration file.
    #[arg(long, short = 'c')]
    pub config: PathBuf,

    /// Output JSON instead of human-readable format.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// Run the check command.
///
/// # Errors
///
/// Returns the config/policy error verbatim so the process exits non-zero
/// with the field-specific diagnostic.
pub fn run(args: &CheckArgs) -> Result<()> {
    let policy = kiosk_core::load_from_path(&args.config)
        .with_context(|| format!("configuration rejected: {}", args.config.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&policy)?);
    } else {
        print_echo(&policy);
    }
    Ok(())
}

fn print_echo(policy: &Policy) {
    println!("configuration ok");
    println!("  startUrl:        {}", policy.start_url);
    println!("  allowedDomains:  {}", policy.allowed_domains.join(", "));
    if let Some(suffix) = policy.user_agent_suffix.as_deref() {
        println!("  userAgentSuffix: {suffix}");
    }
    println!("  clientVersion:   {}", policy.client_version());
    println!("  clientType:      {}", policy.client_type());
    println!("  sendConfigKey:   {}", policy.send_config_key);
}
