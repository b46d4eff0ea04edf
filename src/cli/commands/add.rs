//! `aegis add` — store a new credential.

use crate::cli::output;
use crate::cli::{open_store, read_password, Cli};
use crate::errors::{AegisError, Result};
use crate::vault::record::validate_identifier;

/// Execute the `add` command.
pub fn execute(cli: &Cli, identifier: &str, password: Option<&str>) -> Result<()> {
    // Fail on a bad name before prompting for anything.
    validate_identifier(identifier)?;

    let store = open_store(cli)?;
    if store.contains(identifier)? {
        return Err(AegisError::CredentialAlreadyExists(identifier.to_string()));
    }

    let secret = read_password(&format!("Password for {identifier}"), password, true)?;
    store.add_credential(identifier, &secret)?;

    crate::audit::log_audit(cli, "add", Some(identifier), None);
    output::success(&format!(
        "Credential '{identifier}' added ({} total)",
        store.count()?
    ));

    Ok(())
}
