//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::CredentialSummary;

/// How many base64 characters of ciphertext/hash to show in tables.
const PREVIEW_LEN: usize = 16;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of credentials (Identifier, Ciphertext, Hash, Created, Updated).
///
/// Ciphertext and hash are shown as truncated base64.
pub fn print_credentials_table(credentials: &[CredentialSummary]) {
    if credentials.is_empty() {
        print_empty_hint();
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Identifier", "Ciphertext", "Hash", "Created", "Updated"]);

    for c in credentials {
        table.add_row(vec![
            c.identifier.clone(),
            preview(&c.ciphertext),
            preview(&c.integrity_hash),
            c.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            c.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }

    println!("{table}");
}

/// Print decrypted credentials as (Identifier, Password, Updated).
pub fn print_revealed_table(rows: &[(String, String, String)]) {
    if rows.is_empty() {
        print_empty_hint();
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Identifier", "Password", "Updated"]);

    for (identifier, password, updated) in rows {
        table.add_row(vec![identifier.as_str(), password.as_str(), updated.as_str()]);
    }

    println!("{table}");
}

fn print_empty_hint() {
    info("No credentials in this vault yet.");
    tip("Run `aegis add <IDENTIFIER>` to add your first credential.");
}

/// Base64-encode `bytes`, cut to `PREVIEW_LEN` characters with an ellipsis.
fn preview(bytes: &[u8]) -> String {
    let encoded = BASE64.encode(bytes);
    if encoded.len() <= PREVIEW_LEN {
        encoded
    } else {
        format!("{}\u{2026}", &encoded[..PREVIEW_LEN])
    }
}
