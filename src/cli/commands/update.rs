//! `aegis update` — replace the password of an existing credential.

use crate::cli::output;
use crate::cli::{open_store, read_password, Cli};
use crate::errors::{AegisError, Result};

/// Execute the `update` command.
pub fn execute(cli: &Cli, identifier: &str, password: Option<&str>) -> Result<()> {
    let store = open_store(cli)?;

    // Check first so a typo doesn't cost a password prompt.
    if !store.contains(identifier)? {
        return Err(AegisError::CredentialNotFound(identifier.to_string()));
    }

    let secret = read_password(&format!("New password for {identifier}"), password, true)?;
    store.update_credential(identifier, &secret)?;

    crate::audit::log_audit(cli, "update", Some(identifier), None);
    output::success(&format!("Credential '{identifier}' updated"));

    Ok(())
}
