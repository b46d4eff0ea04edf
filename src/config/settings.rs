use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::passphrase::DEFAULT_PASSPHRASE_ENV;
use crate::errors::{AegisError, Result};

/// Vault configuration, loaded from `<data_dir>/aegis.toml`.
///
/// Every field has a sensible default so Aegis works out-of-the-box
/// without any config file at all.
///
/// The Argon2 fields are part of every stored secret's key: changing
/// them for an existing vault makes its rows undecryptable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// SQLite database file name inside the data directory.
    #[serde(default = "default_database_file")]
    pub database_file: String,

    /// Environment variable holding the master passphrase.
    #[serde(default = "default_passphrase_env")]
    pub passphrase_env: String,

    /// Argon2 memory cost in KiB (default: 64 MB).
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,

    /// Argon2 iteration count (default: 3).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,

    /// Argon2 parallelism degree (default: 4).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_database_file() -> String {
    "pm.sqlite".to_string()
}

fn default_passphrase_env() -> String {
    DEFAULT_PASSPHRASE_ENV.to_string()
}

fn default_argon2_memory_kib() -> u32 {
    65_536 // 64 MB
}

fn default_argon2_iterations() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_file: default_database_file(),
            passphrase_env: default_passphrase_env(),
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the data directory.
    pub const FILE_NAME: &'static str = "aegis.toml";

    /// Load settings from `<data_dir>/aegis.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let config_path = data_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            AegisError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Write these settings to `<data_dir>/aegis.toml`, replacing any
    /// existing file.
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| AegisError::SerializationError(format!("settings: {e}")))?;
        std::fs::write(data_dir.join(Self::FILE_NAME), contents)?;
        Ok(())
    }

    /// Build the full path to the credential database.
    ///
    /// Example: `~/.config/aegis/pm.sqlite`
    pub fn database_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.database_file)
    }

    /// Convert the Argon2 settings into crypto-layer params.
    pub fn argon2_params(&self) -> crate::crypto::kdf::Argon2Params {
        crate::crypto::kdf::Argon2Params {
            memory_kib: self.argon2_memory_kib,
            iterations: self.argon2_iterations,
            parallelism: self.argon2_parallelism,
        }
    }
}

/// Default data directory: `<user config dir>/aegis`.
///
/// Returns `None` on platforms without a config directory.
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("aegis"))
}

// ── Tests ────────────────────────────────────────────────────────────
