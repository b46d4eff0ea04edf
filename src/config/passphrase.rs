//! The master passphrase every vault operation encrypts under.
//!
//! It is read once at startup and handed to `VaultStore` as an explicit
//! value.  The bytes live in a zeroizing buffer and are never printed.

use std::fmt;

use zeroize::Zeroizing;

use crate::errors::{AegisError, Result};

/// Default environment variable holding the master passphrase.
pub const DEFAULT_PASSPHRASE_ENV: &str = "AEGIS_MASTER_PASS";

/// An immutable, non-empty master passphrase.
#[derive(Clone)]
pub struct MasterPassphrase {
    bytes: Zeroizing<Vec<u8>>,
}

impl MasterPassphrase {
    /// Wrap raw passphrase bytes.  Empty input is rejected.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = Zeroizing::new(bytes.into());
        if bytes.is_empty() {
            return Err(AegisError::EmptyMasterPassphrase);
        }
        Ok(Self { bytes })
    }

    /// Read the passphrase from the environment variable `var`.
    ///
    /// The raw OS bytes are used, so a value that is not valid UTF-8 still
    /// works.  Unset or empty variables are reported as
    /// `MissingMasterPassphrase` so the entry point can decide to abort.
    pub fn from_env(var: &str) -> Result<Self> {
        let value = std::env::var_os(var)
            .ok_or_else(|| AegisError::MissingMasterPassphrase(var.to_string()))?;
        Self::new(value.into_encoded_bytes())
            .map_err(|_| AegisError::MissingMasterPassphrase(var.to_string()))
    }

    /// Access the raw passphrase bytes (e.g. to pass to the KDF).
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for MasterPassphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterPassphrase(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_empty() {
        let result = MasterPassphrase::new(Vec::new());
        assert!(matches!(result, Err(AegisError::EmptyMasterPassphrase)));
    }

    #[test]
    fn new_keeps_bytes() {
        let pass = MasterPassphrase::new("s3cret").unwrap();
        assert_eq!(pass.as_bytes(), b"s3cret");
    }

    #[test]
    fn from_env_reports_the_variable_name() {
        let result = MasterPassphrase::from_env("AEGIS_TEST_PASSPHRASE_THAT_IS_NEVER_SET");
        match result {
            Err(AegisError::MissingMasterPassphrase(var)) => {
                assert_eq!(var, "AEGIS_TEST_PASSPHRASE_THAT_IS_NEVER_SET");
            }
            other => panic!("expected MissingMasterPassphrase, got {other:?}"),
        }
    }

    #[test]
    fn from_env_reports_empty_value_under_its_own_name() {
        std::env::set_var("AEGIS_TEST_PASSPHRASE_EMPTY", "");
        let result = MasterPassphrase::from_env("AEGIS_TEST_PASSPHRASE_EMPTY");
        assert!(matches!(
            result,
            Err(AegisError::MissingMasterPassphrase(ref var)) if var == "AEGIS_TEST_PASSPHRASE_EMPTY"
        ));
    }

    #[cfg(unix)]
    #[test]
    fn from_env_accepts_non_utf8_bytes() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let raw = vec![b'p', 0xff, 0xfe, b'w'];
        std::env::set_var("AEGIS_TEST_PASSPHRASE_RAW", OsString::from_vec(raw.clone()));

        let pass = MasterPassphrase::from_env("AEGIS_TEST_PASSPHRASE_RAW").unwrap();
        assert_eq!(pass.as_bytes(), raw.as_slice());
    }

    #[test]
    fn debug_does_not_leak() {
        let pass = MasterPassphrase::new("hunter2").unwrap();
        let shown = format!("{pass:?}");
        assert!(!shown.contains("hunter2"));
    }
}
