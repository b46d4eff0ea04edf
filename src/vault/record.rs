//! VaultRecord and CredentialSummary types.
//!
//! A record is one row of the `pwds` table: the credential identifier,
//! the integrity hash, the (ciphertext, nonce, salt) triple and the
//! creation/update timestamps.  Ciphertext, nonce and salt only decrypt
//! together; never mix them across records.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

use crate::errors::{AegisError, Result};

/// Maximum identifier length in characters.
const MAX_IDENTIFIER_LEN: usize = 256;

/// A single encrypted credential as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultRecord {
    /// Unique, user-chosen name (e.g. "github.com/alice").
    pub identifier: String,

    /// SHA-256 of the plaintext at the time of the last write.
    pub integrity_hash: Vec<u8>,

    /// AES-256-GCM output, tag included.
    pub ciphertext: Vec<u8>,

    /// The nonce used for `ciphertext`.
    pub nonce: Vec<u8>,

    /// The KDF salt that re-derives the key for `ciphertext`.
    pub salt: Vec<u8>,

    /// When this credential was first created.
    pub created_at: DateTime<Utc>,

    /// When this credential was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Metadata plus raw ciphertext, returned by `VaultStore::list_credentials`.
///
/// Nothing here is decrypted; callers that want plaintext go through
/// `fetch_credential` one identifier at a time.
#[derive(Debug, Clone, Serialize)]
pub struct CredentialSummary {
    pub identifier: String,
    pub ciphertext: Vec<u8>,
    pub integrity_hash: Vec<u8>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validate that an identifier is safe to store and export.
///
/// Must be non-empty, at most 256 characters, and free of control
/// characters so every record stays on one line of an export file.
pub fn validate_identifier(identifier: &str) -> Result<()> {
    if identifier.trim().is_empty() {
        return Err(AegisError::InvalidIdentifier(
            "identifier cannot be empty".into(),
        ));
    }
    if identifier.chars().count() > MAX_IDENTIFIER_LEN {
        return Err(AegisError::InvalidIdentifier(format!(
            "identifier cannot exceed {MAX_IDENTIFIER_LEN} characters"
        )));
    }
    if identifier.chars().any(char::is_control) {
        return Err(AegisError::InvalidIdentifier(format!(
            "identifier '{}' contains control characters",
            identifier.escape_debug()
        )));
    }
    Ok(())
}

/// Parse a stored or imported timestamp.
///
/// Accepts RFC 3339 (what Aegis writes), SQLite's `CURRENT_TIMESTAMP`
/// form `YYYY-MM-DD HH:MM:SS` read as UTC, and the
/// `YYYY-MM-DD HH:MM:SS[.f] +hhmm [ZONE]` form older exports carry.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    parse_with_offset(s)
}

/// `date time offset`, optionally followed by a zone name such as `UTC`
/// that only repeats the offset.
fn parse_with_offset(s: &str) -> Option<DateTime<Utc>> {
    let parts: Vec<&str> = s.split_whitespace().collect();
    let (date, time, offset) = match parts.as_slice() {
        [date, time, offset] | [date, time, offset, _] => (*date, *time, *offset),
        _ => return None,
    };
    DateTime::parse_from_str(&format!("{date} {time} {offset}"), "%Y-%m-%d %H:%M:%S%.f %z")
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
