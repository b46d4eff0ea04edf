//! `aegis completions` — print a shell completion script to stdout.
//!
//! Usage:
//!   aegis completions bash > ~/.local/share/bash-completion/completions/aegis
//!   aegis completions zsh > "${fpath[1]}/_aegis"
//!   aegis completions fish > ~/.config/fish/completions/aegis.fish

use std::io;

use clap::{CommandFactory, ValueEnum};
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::errors::{AegisError, Result};

/// Execute the `completions` command.
pub fn execute(shell: &str) -> Result<()> {
    let shell = parse_shell(shell)?;
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
    Ok(())
}

/// Resolve a shell name (case-insensitive).  `ps` and `pwsh` are accepted
/// for PowerShell.
fn parse_shell(name: &str) -> Result<Shell> {
    let normalized = match name.to_lowercase().as_str() {
        "ps" | "pwsh" => "powershell".to_string(),
        other => other.to_string(),
    };

    <Shell as ValueEnum>::from_str(&normalized, true).map_err(|_| {
        let supported: Vec<String> = Shell::value_variants()
            .iter()
            .filter_map(|s| s.to_possible_value().map(|v| v.get_name().to_string()))
            .collect();
        AegisError::CommandFailed(format!(
            "unknown shell '{name}' — supported: {}",
            supported.join(", ")
        ))
    })
}
