//! `aegis verify` — check a candidate password against the stored hash.

use crate::cli::output;
use crate::cli::{open_store, read_password, Cli};
use crate::errors::{AegisError, Result};

/// Execute the `verify` command.
///
/// Exits non-zero when the candidate does not match.
pub fn execute(cli: &Cli, identifier: &str, password: Option<&str>) -> Result<()> {
    let store = open_store(cli)?;
    let candidate = read_password(&format!("Password to check for {identifier}"), password, false)?;

    if store.verify_credential(identifier, &candidate)? {
        output::success(&format!("Password matches '{identifier}'"));
        Ok(())
    } else {
        Err(AegisError::CommandFailed(format!(
            "password does not match '{identifier}'"
        )))
    }
}
