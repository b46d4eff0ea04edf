//! `aegis get` — decrypt a credential and print it or copy it to the clipboard.

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::errors::{AegisError, Result};

/// Execute the `get` command.
pub fn execute(cli: &Cli, identifier: &str, copy: bool) -> Result<()> {
    let store = open_store(cli)?;
    let password = store.fetch_credential(identifier)?;

    crate::audit::log_audit(cli, "get", Some(identifier), copy.then_some("clipboard"));

    if copy {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| AegisError::CommandFailed(format!("clipboard unavailable: {e}")))?;
        clipboard
            .set_text(password.as_str())
            .map_err(|e| AegisError::CommandFailed(format!("clipboard write: {e}")))?;
        output::success(&format!("Password for '{identifier}' copied to clipboard"));
    } else {
        println!("{}", password.as_str());
    }

    Ok(())
}
