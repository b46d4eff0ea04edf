//! `aegis init` — create the data directory, config file and credential database.

use crate::cli::output;
use crate::cli::{data_dir, open_store, Cli};
use crate::config::Settings;
use crate::errors::Result;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let dir = data_dir(cli)?;

    // 1. Pin the current settings so later runs derive keys the same way.
    let config_path = dir.join(Settings::FILE_NAME);
    if config_path.exists() {
        output::info(&format!("Using existing config: {}", config_path.display()));
    } else {
        Settings::default().save(&dir)?;
        output::info(&format!("Wrote default config: {}", config_path.display()));
    }

    // 2. Opening the store creates the schema if it is missing.
    let store = open_store(cli)?;
    let count = store.count()?;

    crate::audit::log_audit(cli, "init", None, None);
    output::success(&format!(
        "Vault ready in {} ({count} credential(s))",
        dir.display()
    ));
    output::tip("Add a credential: aegis add <IDENTIFIER>");

    Ok(())
}
