//! Kiosk lockdown shell CLI entrypoint.
//!
//! - `kiosk check` - validate a config file and echo the effective policy
//! - `kiosk explain` - render the gate decisions for a URL
//! - `kiosk run` - drive a lockdown session (idle inhibition + exit gate)

#![forbid(unsafe_code)]

mod check;
mod explain;
mod platform;
mod run;

use clap::{Parser, Subcommand};

/// Kiosk lockdown shell operator CLI.
#[derive(Parser)]
#[command(name = "kiosk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a configuration file and echo the effective policy.
    ///
    /// The echo is deterministic: allow-list entries keep their config-file
    /// order. Exits non-zero with a field-specific diagnostic on any load
    /// or validation failure.
    Check(check::CheckArgs),

    /// Explain the policy decision for a destination URL.
    ///
    /// Evaluates the URL at both enforcement layers (request interception
    /// and top-level navigation) and prints what each would do, including
    /// the headers an allowed request would carry.
    Explain(explain::ExplainArgs),

    /// Run a lockdown session.
    ///
    /// Loads and validates the config before anything else is constructed,
    /// starts idle inhibition, and gates exit behind the quit password when
    /// one is given. The embedding web view is out of scope here; `run`
    /// drives everything the policy core owns.
    Run(run::RunArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays clean for JSON output.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check(args) => check::run(&args),
        Commands::Explain(args) => explain::run(&args),
        Commands::Run(args) => run::run(args),
    }
}
