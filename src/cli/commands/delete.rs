//! `aegis delete` — remove a credential from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::errors::{AegisError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, identifier: &str, force: bool) -> Result<()> {
    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete credential '{identifier}'?"))
            .default(false)
            .interact()
            .map_err(|e| AegisError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let store = open_store(cli)?;
    let removed = store.delete_credential(identifier)?;

    crate::audit::log_audit(
        cli,
        "delete",
        Some(identifier),
        Some(&format!("{removed} row(s)")),
    );

    if removed == 0 {
        output::warning(&format!("No credential named '{identifier}' — nothing deleted"));
    } else {
        output::success(&format!("Deleted credential '{identifier}'"));
    }

    Ok(())
}
