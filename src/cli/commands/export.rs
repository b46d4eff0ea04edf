//! `aegis export` — write every encrypted row to a CSV file.
//!
//! Nothing is decrypted; the file is only usable with the same master
//! passphrase and Argon2 settings.

use std::path::Path;

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::errors::Result;
use crate::vault::export_csv;

/// Execute the `export` command.
pub fn execute(cli: &Cli, file: &Path) -> Result<()> {
    let store = open_store(cli)?;
    let count = export_csv(&store, file)?;

    crate::audit::log_audit(
        cli,
        "export",
        None,
        Some(&format!("{count} credential(s) to {}", file.display())),
    );
    output::success(&format!(
        "Exported {count} credential(s) to {}",
        file.display()
    ));
    output::tip("Keep this file private: it holds your encrypted vault.");

    Ok(())
}
