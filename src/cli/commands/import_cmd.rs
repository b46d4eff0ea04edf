//! `aegis import` — load encrypted rows from a CSV export.
//!
//! Rows that fail to parse or collide with an existing identifier are
//! skipped and reported; the rest are inserted as-is.

use std::path::Path;

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::errors::{AegisError, Result};
use crate::vault::import_csv;

/// Execute the `import` command.
pub fn execute(cli: &Cli, file: &Path) -> Result<()> {
    if !file.exists() {
        return Err(AegisError::CommandFailed(format!(
            "import file not found: {}",
            file.display()
        )));
    }

    let store = open_store(cli)?;
    let report = import_csv(&store, file)?;

    for skipped in &report.skipped {
        output::warning(&format!("line {}: {}", skipped.line, skipped.reason));
    }

    crate::audit::log_audit(
        cli,
        "import",
        None,
        Some(&format!(
            "{} imported, {} skipped",
            report.imported,
            report.skipped.len()
        )),
    );

    output::success(&format!(
        "Imported {} credential(s) from {}",
        report.imported,
        file.display()
    ));
    if !report.skipped.is_empty() {
        output::info(&format!("{} row(s) skipped", report.skipped.len()));
    }

    Ok(())
}
