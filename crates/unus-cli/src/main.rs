//! Unus binary.
//!
//! # Usage
//!
//! ```bash
//! # Seal a secret from stdin; prints the id
//! echo -n "launch codes" | unus seal --passphrase "$PASSPHRASE" --content-type text/plain
//!
//! # Reveal it (once)
//! unus reveal 1234567890 --passphrase "$PASSPHRASE"
//!
//! # Passphrase from the environment, custom database
//! UNUS_PASSPHRASE=... unus --db /var/lib/unus.redb reveal 1234567890
//! ```

use std::{io, process::ExitCode};

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use unus_cli::{Cli, run};
use unus_vault::VaultConfig;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    // stdout carries revealed secrets, so logs go to stderr
    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();

    match run(cli, VaultConfig::default(), &mut io::stdin().lock(), &mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "unus failed");
            ExitCode::from(e.exit_code())
        },
    }
}
