//! Startup configuration: `aegis.toml` settings and the master passphrase.

pub mod passphrase;
pub mod settings;

pub use passphrase::{MasterPassphrase, DEFAULT_PASSPHRASE_ENV};
pub use settings::{default_data_dir, Settings};
