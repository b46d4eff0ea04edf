//! CSV export and import of already-encrypted credentials.
//!
//! File layout (UTF-8):
//!
//! ```text
//! username,password_hash,password_ciphertext,nonce,salt,created_on,updated_on
//! github,[12 0 255 ...],[...],[...],[...],2024-03-01T12:30:45+00:00,2024-03-01T12:30:45+00:00
//! ```
//!
//! Binary columns are written as bracketed, space-separated decimal bytes
//! (`[]` when empty).  Neither direction touches the cipher: import stores
//! the bytes it reads, so a file is only useful in a vault that shares the
//! exporting vault's master passphrase.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, StringRecord, Writer};
use tracing::{debug, warn};

use crate::errors::{AegisError, Result};

use super::record::{parse_timestamp, VaultRecord};
use super::store::{VaultStore, COLUMNS};

/// Columns an import file must name in its header.
const REQUIRED_COLUMNS: [&str; 5] = [
    "username",
    "password_hash",
    "password_ciphertext",
    "nonce",
    "salt",
];

/// Outcome of an import: how many rows landed and which were skipped.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: Vec<SkippedRow>,
}

/// A data row that could not be imported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the file (the header is line 1).
    pub line: u64,
    pub reason: String,
}

// ----------------------------------------------------------------------
// Export
// ----------------------------------------------------------------------

/// Export every record to a CSV file at `path`.  Returns the record count.
pub fn export_csv(store: &VaultStore, path: &Path) -> Result<usize> {
    let file = File::create(path)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, perms)?;
    }

    export_to_writer(store, file)
}

/// Export every record as CSV to `writer`.  Returns the record count.
pub fn export_to_writer<W: Write>(store: &VaultStore, writer: W) -> Result<usize> {
    let records = store.records()?;
    let mut csv = Writer::from_writer(writer);

    csv.write_record(COLUMNS)?;
    for record in &records {
        csv.write_record([
            record.identifier.clone(),
            format_byte_array(&record.integrity_hash),
            format_byte_array(&record.ciphertext),
            format_byte_array(&record.nonce),
            format_byte_array(&record.salt),
            record.created_at.to_rfc3339(),
            record.updated_at.to_rfc3339(),
        ])?;
    }
    csv.flush()?;

    debug!(count = records.len(), "credentials exported");
    Ok(records.len())
}

// ----------------------------------------------------------------------
// Import
// ----------------------------------------------------------------------

/// Import records from the CSV file at `path`.
pub fn import_csv(store: &VaultStore, path: &Path) -> Result<ImportReport> {
    let file = File::open(path)?;
    import_from_reader(store, file)
}

/// Import records from CSV read out of `reader`.
///
/// Structural problems (no header, no data rows, missing required
/// columns) abort the whole import with `MalformedImport`.  Anything
/// wrong with a single row skips that row with a warning; rows already
/// inserted stay inserted.
pub fn import_from_reader<R: Read>(store: &VaultStore, reader: R) -> Result<ImportReport> {
    let mut csv = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    // Read everything up front so structural checks run before any insert.
    let mut rows = Vec::new();
    for result in csv.records() {
        match result {
            Ok(record) => rows.push(Ok(record)),
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => rows.push(Err(e)),
        }
    }

    let mut rows = rows.into_iter();
    let header = match rows.next() {
        Some(Ok(header)) => header,
        Some(Err(e)) => {
            return Err(AegisError::MalformedImport(format!(
                "unreadable header: {e}"
            )))
        }
        None => return Err(AegisError::MalformedImport("file is empty".into())),
    };
    let layout = ColumnLayout::from_header(&header)?;

    let data: Vec<_> = rows.collect();
    if data.is_empty() {
        return Err(AegisError::MalformedImport(
            "file must contain a header and at least one data row".into(),
        ));
    }

    let mut report = ImportReport::default();
    for row in data {
        let (line, outcome) = match row {
            Ok(record) => {
                let line = record.position().map_or(0, |p| p.line());
                (line, import_row(store, &layout, &record))
            }
            Err(e) => {
                let line = e.position().map_or(0, |p| p.line());
                (line, Err(AegisError::Csv(e)))
            }
        };

        match outcome {
            Ok(()) => report.imported += 1,
            Err(e) => {
                warn!(line, error = %e, "skipping import row");
                report.skipped.push(SkippedRow {
                    line,
                    reason: e.to_string(),
                });
            }
        }
    }

    debug!(
        imported = report.imported,
        skipped = report.skipped.len(),
        "credentials imported"
    );
    Ok(report)
}

/// Parse one data row and insert it verbatim.
fn import_row(store: &VaultStore, layout: &ColumnLayout, row: &StringRecord) -> Result<()> {
    let created_at = optional_timestamp(row, layout.created_on, "created_on").unwrap_or_else(Utc::now);
    let updated_at = optional_timestamp(row, layout.updated_on, "updated_on").unwrap_or(created_at);

    let record = VaultRecord {
        identifier: field(row, layout.username, "username")?.to_string(),
        integrity_hash: parse_byte_array(field(row, layout.password_hash, "password_hash")?)?,
        ciphertext: parse_byte_array(field(
            row,
            layout.password_ciphertext,
            "password_ciphertext",
        )?)?,
        nonce: parse_byte_array(field(row, layout.nonce, "nonce")?)?,
        salt: parse_byte_array(field(row, layout.salt, "salt")?)?,
        created_at,
        updated_at,
    };

    store.insert_record(&record)
}

/// A required field of a data row.
fn field<'r>(row: &'r StringRecord, idx: usize, name: &str) -> Result<&'r str> {
    row.get(idx)
        .ok_or_else(|| AegisError::InvalidImportRow(format!("missing field '{name}'")))
}

/// Read an optional timestamp column.
///
/// Empty, absent and unparseable values all give `None`; timestamps are
/// metadata, so they never cost a row its credential.
fn optional_timestamp(row: &StringRecord, idx: Option<usize>, name: &str) -> Option<DateTime<Utc>> {
    let raw = idx.and_then(|i| row.get(i)).filter(|raw| !raw.trim().is_empty())?;
    let parsed = parse_timestamp(raw);
    if parsed.is_none() {
        warn!(column = name, value = raw, "unreadable timestamp, using a fallback");
    }
    parsed
}

/// Where each column sits in an import file.
#[derive(Debug)]
struct ColumnLayout {
    username: usize,
    password_hash: usize,
    password_ciphertext: usize,
    nonce: usize,
    salt: usize,
    created_on: Option<usize>,
    updated_on: Option<usize>,
}

impl ColumnLayout {
    fn from_header(header: &StringRecord) -> Result<Self> {
        // Spreadsheet tools often prepend a byte-order mark to the first cell.
        let position = |name: &str| {
            header
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
        };

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|name| position(name).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(AegisError::MalformedImport(format!(
                "header is missing column(s): {}",
                missing.join(", ")
            )));
        }

        let required = |name: &str| position(name).unwrap_or_default();
        Ok(Self {
            username: required("username"),
            password_hash: required("password_hash"),
            password_ciphertext: required("password_ciphertext"),
            nonce: required("nonce"),
            salt: required("salt"),
            created_on: position("created_on"),
            updated_on: position("updated_on"),
        })
    }
}

// ----------------------------------------------------------------------
// Byte-array codec
// ----------------------------------------------------------------------

/// Render bytes as `[b0 b1 b2 ...]` with decimal values.
pub fn format_byte_array(bytes: &[u8]) -> String {
    let values: Vec<String> = bytes.iter().map(u8::to_string).collect();
    format!("[{}]", values.join(" "))
}

/// Parse `[b0 b1 b2 ...]` back into bytes.
///
/// Tokens are split on any whitespace; each must be a decimal value in
/// `0..=255`.
pub fn parse_byte_array(s: &str) -> Result<Vec<u8>> {
    let inner = s
        .trim()
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| AegisError::InvalidByteArray(format!("'{s}' is not enclosed in brackets")))?;

    inner
        .split_whitespace()
        .map(|token| {
            token
                .parse::<u8>()
                .map_err(|_| AegisError::InvalidByteArray(format!("invalid byte value '{token}'")))
        })
        .collect()
}
