//! Integrity hash of a stored password.
//!
//! A plain SHA-256 of the plaintext, recomputed on every write.  It is
//! informational: it is never used to authenticate a row and never
//! checked before decryption.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Length of the integrity hash in bytes.
pub const HASH_LEN: usize = 32;

/// SHA-256 of the plaintext password.
pub fn integrity_hash(plaintext: &[u8]) -> [u8; HASH_LEN] {
    let digest = Sha256::digest(plaintext);
    let mut out = [0u8; HASH_LEN];
    out.copy_from_slice(&digest);
    out
}

/// Check whether `candidate` hashes to `stored_hash`.
pub fn matches_hash(candidate: &[u8], stored_hash: &[u8]) -> bool {
    // Use constant-time comparison to avoid timing side channels.
    integrity_hash(candidate)[..].ct_eq(stored_hash).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic() {
        assert_eq!(integrity_hash(b"abc"), integrity_hash(b"abc"));
        assert_ne!(integrity_hash(b"abc"), integrity_hash(b"abd"));
    }

    #[test]
    fn hash_matches_known_vector() {
        let expected: [u8; HASH_LEN] = [
            0xba, 0x78, 0x16, 0xbf, 0x8f, 0x01, 0xcf, 0xea, 0x41, 0x41, 0x40, 0xde, 0x5d, 0xae,
            0x22, 0x23, 0xb0, 0x03, 0x61, 0xa3, 0x96, 0x17, 0x7a, 0x9c, 0xb4, 0x10, 0xff, 0x61,
            0xf2, 0x00, 0x15, 0xad,
        ];
        assert_eq!(integrity_hash(b"abc"), expected);
    }

    #[test]
    fn matches_hash_checks_candidate() {
        let stored = integrity_hash(b"correct horse");
        assert!(matches_hash(b"correct horse", &stored));
        assert!(!matches_hash(b"battery staple", &stored));
        // Truncated stored hash never matches.
        assert!(!matches_hash(b"correct horse", &stored[..16]));
    }
}
