//! High-level vault operations used by CLI commands.
//!
//! `VaultStore` wraps the SQLite `pwds` table and the crypto layer so
//! that the rest of the application can work with simple method calls
//! like `store.add_credential("github", "hunter2")`.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, warn};
use zeroize::{Zeroize, Zeroizing};

use crate::config::MasterPassphrase;
use crate::crypto::digest::{integrity_hash, matches_hash};
use crate::crypto::encryption::{decrypt_secret, encrypt_secret};
use crate::crypto::kdf::Argon2Params;
use crate::errors::{AegisError, Result};

use super::record::{parse_timestamp, validate_identifier, CredentialSummary, VaultRecord};

/// Columns of the `pwds` table, in the order export writes them.
pub const COLUMNS: [&str; 7] = [
    "username",
    "password_hash",
    "password_ciphertext",
    "nonce",
    "salt",
    "created_on",
    "updated_on",
];

const SELECT_RECORD: &str = "SELECT username, password_hash, password_ciphertext, nonce, salt,
        created_on, updated_on
 FROM pwds";

/// The main vault handle.  Create one with `VaultStore::open` (or
/// `VaultStore::in_memory` in tests), then use its methods to manage
/// credentials.
pub struct VaultStore {
    /// Connection to the credential database.
    conn: Connection,

    /// Passphrase every secret is encrypted under.
    passphrase: MasterPassphrase,

    /// Argon2id cost used for every key derivation.
    kdf_params: Argon2Params,
}

impl VaultStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Open (or create) the credential database at `path`.
    ///
    /// The schema is created if missing.  On Unix the database file is
    /// restricted to owner-only access.
    pub fn open(path: &Path, passphrase: MasterPassphrase, kdf_params: Argon2Params) -> Result<Self> {
        kdf_params.validate()?;
        let store = Self {
            conn: Connection::open(path)?,
            passphrase,
            kdf_params,
        };
        store.init_schema()?;

        // Restrict the database to the owner once the file exists on disk.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        debug!(path = %path.display(), "vault opened");
        Ok(store)
    }

    /// Create a vault backed by an in-memory database (for testing).
    pub fn in_memory(passphrase: MasterPassphrase, kdf_params: Argon2Params) -> Result<Self> {
        kdf_params.validate()?;
        let store = Self {
            conn: Connection::open_in_memory()?,
            passphrase,
            kdf_params,
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create the `pwds` table if it does not exist yet.  Safe to call
    /// any number of times.
    pub fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS pwds (
                username            TEXT PRIMARY KEY,
                password_hash       BLOB NOT NULL,
                password_ciphertext BLOB NOT NULL,
                nonce               BLOB NOT NULL,
                salt                BLOB NOT NULL,
                created_on          DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_on          DATETIME DEFAULT CURRENT_TIMESTAMP
            );",
        )?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Credential operations
    // ------------------------------------------------------------------

    /// Add a new credential.
    ///
    /// Hashes and encrypts the plaintext under a fresh salt and nonce.
    /// Fails with `CredentialAlreadyExists` if the identifier is taken.
    pub fn add_credential(&self, identifier: &str, plaintext_password: &str) -> Result<()> {
        validate_identifier(identifier)?;

        let hash = integrity_hash(plaintext_password.as_bytes());
        let sealed = encrypt_secret(
            self.passphrase.as_bytes(),
            plaintext_password.as_bytes(),
            &self.kdf_params,
        )?;
        let now = Utc::now().to_rfc3339();

        self.conn
            .execute(
                "INSERT INTO pwds (username, password_hash, password_ciphertext, nonce, salt,
                                   created_on, updated_on)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
                params![
                    identifier,
                    hash.as_slice(),
                    sealed.ciphertext,
                    sealed.nonce,
                    sealed.salt,
                    now
                ],
            )
            .map_err(|e| map_insert_error(identifier, e))?;

        debug!(identifier = %identifier, "credential added");
        Ok(())
    }

    /// Decrypt and return the password stored under `identifier`.
    ///
    /// This is the only path that reconstructs plaintext.  The result is
    /// wiped from memory on drop; do not copy it anywhere persistent.
    pub fn fetch_credential(&self, identifier: &str) -> Result<Zeroizing<String>> {
        let (ciphertext, nonce, salt): (Vec<u8>, Vec<u8>, Vec<u8>) = self
            .conn
            .query_row(
                "SELECT password_ciphertext, nonce, salt FROM pwds WHERE username = ?1",
                params![identifier],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?
            .ok_or_else(|| AegisError::CredentialNotFound(identifier.to_string()))?;

        let plaintext_bytes = decrypt_secret(
            self.passphrase.as_bytes(),
            &ciphertext,
            &nonce,
            &salt,
            &self.kdf_params,
        )?;

        // On error, zeroize the bytes inside the error before discarding.
        String::from_utf8(plaintext_bytes)
            .map(Zeroizing::new)
            .map_err(|e| {
                let mut bad_bytes = e.into_bytes();
                bad_bytes.zeroize();
                AegisError::SerializationError("stored password is not valid UTF-8".to_string())
            })
    }

    /// Replace the password stored under `identifier`.
    ///
    /// Always re-encrypts with a brand-new salt and nonce and recomputes
    /// the hash; `created_on` is left untouched.
    pub fn update_credential(&self, identifier: &str, new_plaintext_password: &str) -> Result<()> {
        // Skip the expensive KDF for identifiers that cannot match.
        if !self.contains(identifier)? {
            return Err(AegisError::CredentialNotFound(identifier.to_string()));
        }

        let hash = integrity_hash(new_plaintext_password.as_bytes());
        let sealed = encrypt_secret(
            self.passphrase.as_bytes(),
            new_plaintext_password.as_bytes(),
            &self.kdf_params,
        )?;
        let now = Utc::now().to_rfc3339();

        let rows = self.conn.execute(
            "UPDATE pwds
             SET password_hash = ?1, password_ciphertext = ?2, nonce = ?3, salt = ?4,
                 updated_on = ?5
             WHERE username = ?6",
            params![
                hash.as_slice(),
                sealed.ciphertext,
                sealed.nonce,
                sealed.salt,
                now,
                identifier
            ],
        )?;

        if rows == 0 {
            return Err(AegisError::CredentialNotFound(identifier.to_string()));
        }

        debug!(identifier = %identifier, "credential updated");
        Ok(())
    }

    /// Remove a credential.  Returns the number of rows deleted; zero
    /// means the identifier did not exist, which is not an error.
    pub fn delete_credential(&self, identifier: &str) -> Result<usize> {
        let rows = self
            .conn
            .execute("DELETE FROM pwds WHERE username = ?1", params![identifier])?;

        if rows == 0 {
            warn!(identifier = %identifier, "no credential found to delete");
        } else {
            debug!(identifier = %identifier, "credential deleted");
        }
        Ok(rows)
    }

    /// List every credential's metadata and raw ciphertext, sorted by
    /// identifier.  Nothing is decrypted.
    pub fn list_credentials(&self) -> Result<Vec<CredentialSummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT username, password_ciphertext, password_hash, created_on, updated_on
             FROM pwds
             ORDER BY username",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(CredentialSummary {
                identifier: row.get(0)?,
                ciphertext: row.get(1)?,
                integrity_hash: row.get(2)?,
                created_at: timestamp_column(row, 3)?,
                updated_at: timestamp_column(row, 4)?,
            })
        })?;

        let mut list = Vec::new();
        for row in rows {
            list.push(row?);
        }
        Ok(list)
    }

    /// Check a candidate password against the stored integrity hash.
    ///
    /// No decryption happens; this only tells whether `candidate` is the
    /// password that was last written.
    pub fn verify_credential(&self, identifier: &str, candidate: &str) -> Result<bool> {
        let stored: Vec<u8> = self
            .conn
            .query_row(
                "SELECT password_hash FROM pwds WHERE username = ?1",
                params![identifier],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| AegisError::CredentialNotFound(identifier.to_string()))?;

        Ok(matches_hash(candidate.as_bytes(), &stored))
    }

    // ------------------------------------------------------------------
    // Raw records (bulk transfer)
    // ------------------------------------------------------------------

    /// Every full row, sorted by identifier.
    pub fn records(&self) -> Result<Vec<VaultRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_RECORD} ORDER BY username"))?;
        let rows = stmt.query_map([], row_to_record)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// A single full row, if it exists.
    pub fn record(&self, identifier: &str) -> Result<Option<VaultRecord>> {
        let record = self
            .conn
            .query_row(
                &format!("{SELECT_RECORD} WHERE username = ?1"),
                params![identifier],
                row_to_record,
            )
            .optional()?;
        Ok(record)
    }

    /// Insert an already-encrypted record verbatim.
    ///
    /// Never re-encrypts: the bytes are only decryptable if they were
    /// produced under the same master passphrase.
    pub fn insert_record(&self, record: &VaultRecord) -> Result<()> {
        validate_identifier(&record.identifier)?;

        self.conn
            .execute(
                "INSERT INTO pwds (username, password_hash, password_ciphertext, nonce, salt,
                                   created_on, updated_on)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    record.identifier,
                    record.integrity_hash,
                    record.ciphertext,
                    record.nonce,
                    record.salt,
                    record.created_at.to_rfc3339(),
                    record.updated_at.to_rfc3339()
                ],
            )
            .map_err(|e| map_insert_error(&record.identifier, e))?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns `true` if a credential with the given identifier exists.
    ///
    /// This is a metadata-only check — no decryption is performed.
    pub fn contains(&self, identifier: &str) -> Result<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM pwds WHERE username = ?1",
                params![identifier],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Returns the number of stored credentials.
    pub fn count(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM pwds", [], |row| row.get(0))?;
        Ok(usize::try_from(n).unwrap_or_default())
    }
}

/// Translate a primary-key violation into `CredentialAlreadyExists`.
fn map_insert_error(identifier: &str, err: rusqlite::Error) -> AegisError {
    if let rusqlite::Error::SqliteFailure(ref failure, _) = err {
        let duplicate = failure.code == rusqlite::ErrorCode::ConstraintViolation
            && (failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                || failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE);
        if duplicate {
            return AegisError::CredentialAlreadyExists(identifier.to_string());
        }
    }
    AegisError::Database(err)
}

/// Map a row selected with `SELECT_RECORD` to a `VaultRecord`.
fn row_to_record(row: &Row<'_>) -> rusqlite::Result<VaultRecord> {
    Ok(VaultRecord {
        identifier: row.get(0)?,
        integrity_hash: row.get(1)?,
        ciphertext: row.get(2)?,
        nonce: row.get(3)?,
        salt: row.get(4)?,
        created_at: timestamp_column(row, 5)?,
        updated_at: timestamp_column(row, 6)?,
    })
}

/// Read a timestamp column inside a row-mapping closure.
///
/// NULL, non-text and unparseable values map to the Unix epoch with a
/// warning, so one damaged row never hides the others from `list` or
/// `export`.
fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let parsed = match row.get_ref(idx)? {
        ValueRef::Text(raw) => std::str::from_utf8(raw).ok().and_then(parse_timestamp),
        _ => None,
    };

    Ok(parsed.unwrap_or_else(|| {
        let identifier: Option<String> = row.get(0).ok();
        warn!(
            identifier = identifier.as_deref().unwrap_or("?"),
            column = idx,
            "unreadable timestamp, showing the Unix epoch"
        );
        DateTime::<Utc>::default()
    }))
}
