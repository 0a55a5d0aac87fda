//! Unus command-line interface.
//!
//! Argument definitions and command execution for the `unus` binary. The
//! binary only parses arguments, installs logging and calls [`run`]; keeping
//! the rest here lets tests drive whole commands against a temporary
//! database with in-memory stdin and stdout.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

use std::{
    fs::{self, File},
    io::{self, Read, Write},
    path::PathBuf,
};

use clap::{Parser, Subcommand};
use thiserror::Error;
use unus_vault::{ContentType, RedbStore, Secret, Snowflake, Vault, VaultConfig, VaultError};
use zeroize::Zeroizing;

/// Seal and reveal one-time secrets
#[derive(Parser, Debug)]
#[command(name = "unus")]
#[command(about = "Seal a secret under a passphrase; reveal it exactly once")]
#[command(version)]
pub struct Cli {
    /// Path to the vault database
    #[arg(long, global = true, default_value = "unus.redb")]
    pub db: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Operation to perform
    #[command(subcommand)]
    pub command: Command,
}

/// Vault operations.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Seal a secret read from stdin (or a file) and print its id
    Seal {
        /// Passphrase, at least 32 bytes
        #[arg(long, env = "UNUS_PASSPHRASE", hide_env_values = true)]
        passphrase: String,

        /// Media type of the secret
        #[arg(long, default_value = "text/plain")]
        content_type: ContentType,

        /// Read the secret from this file instead of stdin
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Reveal a secret and destroy it
    Reveal {
        /// Id printed by `seal`
        id: u64,

        /// Passphrase the secret was sealed with
        #[arg(long, env = "UNUS_PASSPHRASE", hide_env_values = true)]
        passphrase: String,

        /// Write the secret to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Errors surfaced by the binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// The vault refused or failed the operation
    #[error(transparent)]
    Vault(#[from] VaultError),

    /// Reading the secret or writing the result failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Process exit code: 2 for bad input or a missing secret, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Vault(e) if e.is_client_error() => 2,
            Self::Vault(_) | Self::Io(_) => 1,
        }
    }
}

/// Execute `cli` against the database it names.
///
/// `input` stands in for stdin and `output` for stdout. Logging goes through
/// `tracing`, never `output`, so a revealed secret can be piped cleanly.
///
/// # Errors
///
/// - `Vault`: the database could not be opened, or the vault rejected the
///   operation
/// - `Io`: the secret could not be read or written
pub fn run(
    cli: Cli,
    config: VaultConfig,
    input: &mut impl Read,
    output: &mut impl Write,
) -> Result<(), CliError> {
    let store = RedbStore::open(&cli.db).map_err(VaultError::from)?;
    let vault = Vault::with_parts(store, Snowflake::new(), config);

    match cli.command {
        Command::Seal { passphrase, content_type, input: path } => {
            let passphrase = Zeroizing::new(passphrase);

            // One byte over the limit is enough for the vault to reject it
            let limit = vault.config().max_secret_bytes as u64 + 1;
            let mut bytes = Vec::new();
            match path {
                Some(path) => File::open(path)?.take(limit).read_to_end(&mut bytes)?,
                None => input.take(limit).read_to_end(&mut bytes)?,
            };

            let id = vault.deposit(passphrase.as_bytes(), &Secret::new(content_type, bytes))?;
            writeln!(output, "{id}")?;
        },
        Command::Reveal { id, passphrase, output: path } => {
            let passphrase = Zeroizing::new(passphrase);
            let secret = vault.reveal(id, passphrase.as_bytes())?;

            match path {
                Some(path) => fs::write(path, &secret.secret)?,
                None => output.write_all(&secret.secret)?,
            }
            tracing::debug!(id, content_type = %secret.content_type, "wrote secret");
        },
    }

    output.flush()?;
    Ok(())
}
