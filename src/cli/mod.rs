//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing::debug;
use zeroize::Zeroizing;

use crate::config::{default_data_dir, MasterPassphrase, Settings};
use crate::errors::{AegisError, Result};
use crate::vault::VaultStore;

/// Aegis CLI: encrypted local credential vault.
#[derive(Parser)]
#[command(
    name = "aegis",
    about = "Encrypted local credential vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory holding the database, config and audit log
    /// (default: <config dir>/aegis)
    #[arg(long, env = "AEGIS_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,
}

/// Output format for `list`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ListFormat {
    Table,
    Json,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create the data directory and credential database
    Init,

    /// Add a new credential
    Add {
        /// Credential identifier (e.g. github.com/alice)
        identifier: String,
        /// Password (omit for interactive prompt or piped stdin)
        password: Option<String>,
    },

    /// Decrypt and print a credential's password
    Get {
        /// Credential identifier
        identifier: String,
        /// Copy to the clipboard instead of printing
        #[arg(short, long)]
        copy: bool,
    },

    /// Replace the password of an existing credential
    Update {
        /// Credential identifier
        identifier: String,
        /// New password (omit for interactive prompt or piped stdin)
        password: Option<String>,
    },

    /// Delete a credential
    Delete {
        /// Credential identifier
        identifier: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// List all credentials
    List {
        /// Decrypt and show every password
        #[arg(long)]
        reveal: bool,
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: ListFormat,
    },

    /// Check a candidate password against a stored credential
    Verify {
        /// Credential identifier
        identifier: String,
        /// Candidate password (omit for interactive prompt or piped stdin)
        password: Option<String>,
    },

    /// Export all encrypted credentials to a CSV file
    Export {
        /// Output file path
        file: PathBuf,
    },

    /// Import encrypted credentials from a CSV file
    Import {
        /// Path to the file to import
        file: PathBuf,
    },

    /// View the audit log of vault operations
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
        /// Show entries since a duration ago (e.g. 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },

    /// Show version information
    Version,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the data directory and make sure it exists.
///
/// Precedence: `--data-dir`, then `AEGIS_DATA_DIR`, then the platform
/// config directory.  New directories are created owner-only.
pub fn data_dir(cli: &Cli) -> Result<PathBuf> {
    let dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => default_data_dir().ok_or_else(|| {
            AegisError::ConfigError(
                "could not determine a config directory — pass --data-dir".into(),
            )
        })?,
    };

    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o700))?;
        }
    }

    Ok(dir)
}

/// Load settings, read the master passphrase and open the vault.
pub fn open_store(cli: &Cli) -> Result<VaultStore> {
    let dir = data_dir(cli)?;
    let settings = Settings::load(&dir)?;
    let passphrase = MasterPassphrase::from_env(&settings.passphrase_env)?;
    let path = settings.database_path(&dir);

    debug!(path = %path.display(), "opening credential database");
    VaultStore::open(&path, passphrase, settings.argon2_params())
}

/// Read a password from one of three sources.
///
/// 1. Inline value on the command line (warns about shell history)
/// 2. Piped stdin (when stdin is not a terminal)
/// 3. Interactive hidden prompt, with confirmation when `confirm` is set
pub fn read_password(prompt: &str, inline: Option<&str>, confirm: bool) -> Result<Zeroizing<String>> {
    if let Some(v) = inline {
        output::warning("Password provided on command line — it may appear in shell history.");
        return Ok(Zeroizing::new(v.to_string()));
    }

    if !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        let trimmed = buf.trim_end_matches(['\r', '\n']);
        return Ok(Zeroizing::new(trimmed.to_string()));
    }

    let mut input = dialoguer::Password::new().with_prompt(prompt);
    if confirm {
        input = input.with_confirmation("Confirm password", "Passwords do not match, try again");
    }

    let pw = input
        .interact()
        .map_err(|e| AegisError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}
