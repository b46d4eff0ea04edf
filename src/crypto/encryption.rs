//! AES-256-GCM authenticated encryption.
//!
//! `seal` generates a fresh random 12-byte nonce for every call and hands
//! it back next to the ciphertext; the caller stores both.  The ciphertext
//! carries the 16-byte authentication tag at its end.
//!
//! `encrypt_secret` / `decrypt_secret` layer the passphrase KDF on top:
//! every encryption draws a new salt, so no two secrets share a key and
//! a (key, nonce) pair is never reused.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use zeroize::Zeroize;

use super::kdf::{derive_key, generate_salt, Argon2Params, KEY_LEN, SALT_LEN};
use crate::errors::{AegisError, Result};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the AES-256-GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// The persisted output of one encryption: all three parts are needed
/// to get the plaintext back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedSecret {
    pub ciphertext: Vec<u8>,
    pub nonce: Vec<u8>,
    pub salt: Vec<u8>,
}

/// Encrypt `plaintext` with a 32-byte `key` and a fresh random nonce.
///
/// Returns `(ciphertext, nonce)`.
pub fn seal(key: &[u8; KEY_LEN], plaintext: &[u8]) -> Result<(Vec<u8>, [u8; NONCE_LEN])> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| AegisError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| AegisError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    nonce_bytes.copy_from_slice(&nonce);
    Ok((ciphertext, nonce_bytes))
}

/// Decrypt and authenticate data produced by `seal`.
///
/// Any mismatch (wrong key, flipped bit, wrong nonce) is reported as
/// `DecryptionFailed`.
pub fn open(key: &[u8; KEY_LEN], nonce: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    if nonce.len() != NONCE_LEN {
        return Err(AegisError::DecryptionFailed);
    }
    let nonce = Nonce::from_slice(nonce);

    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| AegisError::DecryptionFailed)?;

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| AegisError::DecryptionFailed)
}

/// Encrypt a secret under the master passphrase.
///
/// Draws a new salt, derives a one-off key from it and seals the
/// plaintext.  The derived key is zeroized before returning.
pub fn encrypt_secret(
    passphrase: &[u8],
    plaintext: &[u8],
    params: &Argon2Params,
) -> Result<SealedSecret> {
    let salt = generate_salt();
    let mut key = derive_key(passphrase, &salt, params)?;
    let sealed = seal(&key, plaintext);
    key.zeroize();

    let (ciphertext, nonce) = sealed?;
    Ok(SealedSecret {
        ciphertext,
        nonce: nonce.to_vec(),
        salt: salt.to_vec(),
    })
}

/// Decrypt a secret produced by `encrypt_secret`.
///
/// A salt of the wrong length can only come from a damaged row, so it is
/// reported as `DecryptionFailed` rather than a KDF error.
pub fn decrypt_secret(
    passphrase: &[u8],
    ciphertext: &[u8],
    nonce: &[u8],
    salt: &[u8],
    params: &Argon2Params,
) -> Result<Vec<u8>> {
    if salt.len() != SALT_LEN || nonce.len() != NONCE_LEN {
        return Err(AegisError::DecryptionFailed);
    }

    let mut key = derive_key(passphrase, salt, params)?;
    let plaintext = open(&key, nonce, ciphertext);
    key.zeroize();
    plaintext
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seal_output_carries_tag() {
        let key = [0x42u8; KEY_LEN];
        let (ciphertext, nonce) = seal(&key, b"hunter2").unwrap();
        assert_eq!(ciphertext.len(), b"hunter2".len() + TAG_LEN);
        assert_eq!(nonce.len(), NONCE_LEN);
    }

    #[test]
    fn open_rejects_short_nonce() {
        let key = [0x42u8; KEY_LEN];
        let (ciphertext, nonce) = seal(&key, b"value").unwrap();
        let result = open(&key, &nonce[..8], &ciphertext);
        assert!(matches!(result, Err(AegisError::DecryptionFailed)));
    }

    #[test]
    fn decrypt_secret_rejects_truncated_salt() {
        let params = Argon2Params::minimum();
        let sealed = encrypt_secret(b"master", b"value", &params).unwrap();
        let result = decrypt_secret(
            b"master",
            &sealed.ciphertext,
            &sealed.nonce,
            &sealed.salt[..10],
            &params,
        );
        assert!(matches!(result, Err(AegisError::DecryptionFailed)));
    }

    #[test]
    fn empty_plaintext_roundtrips() {
        let params = Argon2Params::minimum();
        let sealed = encrypt_secret(b"master", b"", &params).unwrap();
        assert_eq!(sealed.ciphertext.len(), TAG_LEN);

        let plaintext =
            decrypt_secret(b"master", &sealed.ciphertext, &sealed.nonce, &sealed.salt, &params)
                .unwrap();
        assert!(plaintext.is_empty());
    }
}
