use thiserror::Error;

/// All errors that can occur in Aegis.
#[derive(Debug, Error)]
pub enum AegisError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — wrong master passphrase or corrupted data")]
    DecryptionFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Credential errors ---
    #[error("Credential '{0}' not found")]
    CredentialNotFound(String),

    #[error("Credential '{0}' already exists (use `update` to change it)")]
    CredentialAlreadyExists(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    // --- Bulk transfer errors ---
    #[error("Malformed import file: {0}")]
    MalformedImport(String),

    #[error("Invalid byte array: {0}")]
    InvalidByteArray(String),

    #[error("Invalid import row: {0}")]
    InvalidImportRow(String),

    // --- Startup errors ---
    #[error("{0} environment variable is missing or empty — set it to your master passphrase")]
    MissingMasterPassphrase(String),

    #[error("Master passphrase must not be empty")]
    EmptyMasterPassphrase,

    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- Storage errors ---
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Audit error: {0}")]
    AuditError(String),
}

/// Convenience type alias for Aegis results.
pub type Result<T> = std::result::Result<T, AegisError>;
