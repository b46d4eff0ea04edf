//! Cryptographic primitives for Aegis.
//!
//! This module provides:
//! - Argon2id passphrase-based key derivation (`kdf`)
//! - AES-256-GCM sealing and the per-secret encrypt/decrypt flow (`encryption`)
//! - The SHA-256 integrity hash stored next to each credential (`digest`)

pub mod digest;
pub mod encryption;
pub mod kdf;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt_secret, decrypt_secret, Argon2Params, ...};
pub use digest::{integrity_hash, matches_hash};
pub use encryption::{decrypt_secret, encrypt_secret, open, seal, SealedSecret};
pub use kdf::{derive_key, generate_salt, Argon2Params};
