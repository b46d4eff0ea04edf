//! Vault module — encrypted credential storage.
//!
//! This module provides:
//! - `VaultRecord` and `CredentialSummary` types (`record`)
//! - The SQLite-backed `VaultStore` (`store`)
//! - CSV bulk export/import of encrypted rows (`transfer`)

pub mod record;
pub mod store;
pub mod transfer;

// Re-export the most commonly used items.
pub use record::{CredentialSummary, VaultRecord};
pub use store::VaultStore;
pub use transfer::{export_csv, import_csv, ImportReport, SkippedRow};
