//! `aegis version` — display version information.

use console::style;

use crate::errors::Result;

/// Execute the `version` command.
pub fn execute() -> Result<()> {
    println!(
        "{} {}",
        style("aegis").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(
        "{}",
        style("AES-256-GCM · Argon2id · SQLite").dim()
    );
    Ok(())
}
