//! `aegis list` — display all credentials.

use crate::cli::output;
use crate::cli::{open_store, Cli, ListFormat};
use crate::errors::{AegisError, Result};

/// Execute the `list` command.
pub fn execute(cli: &Cli, reveal: bool, format: ListFormat) -> Result<()> {
    let store = open_store(cli)?;
    let credentials = store.list_credentials()?;

    match (format, reveal) {
        (ListFormat::Json, false) => {
            let json = serde_json::to_string_pretty(&credentials)
                .map_err(|e| AegisError::SerializationError(format!("JSON: {e}")))?;
            println!("{json}");
        }
        (ListFormat::Json, true) => {
            let mut map = serde_json::Map::new();
            for c in &credentials {
                let password = store.fetch_credential(&c.identifier)?;
                map.insert(
                    c.identifier.clone(),
                    serde_json::Value::String(password.as_str().to_owned()),
                );
            }
            let json = serde_json::to_string_pretty(&map)
                .map_err(|e| AegisError::SerializationError(format!("JSON: {e}")))?;
            println!("{json}");
        }
        (ListFormat::Table, false) => {
            output::info(&format!("{} credential(s)", credentials.len()));
            output::print_credentials_table(&credentials);
        }
        (ListFormat::Table, true) => {
            let mut rows = Vec::with_capacity(credentials.len());
            for c in &credentials {
                let password = store.fetch_credential(&c.identifier)?;
                rows.push((
                    c.identifier.clone(),
                    password.as_str().to_owned(),
                    c.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                ));
            }
            output::info(&format!("{} credential(s)", rows.len()));
            output::print_revealed_table(&rows);
        }
    }

    Ok(())
}
