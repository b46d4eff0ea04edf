//! Integration tests for CSV export and import.

use std::fs;

use aegis::config::MasterPassphrase;
use aegis::crypto::Argon2Params;
use aegis::errors::AegisError;
use aegis::vault::{export_csv, import_csv, VaultStore};
use tempfile::TempDir;

fn store_with(passphrase: &str) -> VaultStore {
    VaultStore::in_memory(
        MasterPassphrase::new(passphrase).unwrap(),
        Argon2Params::minimum(),
    )
    .unwrap()
}

const HEADER: &str =
    "username,password_hash,password_ciphertext,nonce,salt,created_on,updated_on\n";

#[test]
fn export_then_import_into_empty_vault() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("backup.csv");

    let source = store_with("shared");
    source.add_credential("github", "hunter2").unwrap();
    source.add_credential("bank, checking", "p@ss,word").unwrap();
    source.add_credential("mail", "").unwrap();
    assert_eq!(export_csv(&source, &file).unwrap(), 3);

    let target = store_with("shared");
    let report = import_csv(&target, &file).unwrap();
    assert_eq!(report.imported, 3);
    assert!(report.skipped.is_empty());

    assert_eq!(target.fetch_credential("github").unwrap().as_str(), "hunter2");
    assert_eq!(
        target.fetch_credential("bank, checking").unwrap().as_str(),
        "p@ss,word"
    );
    assert_eq!(target.fetch_credential("mail").unwrap().as_str(), "");
    assert_eq!(source.records().unwrap(), target.records().unwrap());
}

#[test]
fn imported_rows_need_the_same_passphrase() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("backup.csv");

    let source = store_with("one");
    source.add_credential("github", "hunter2").unwrap();
    export_csv(&source, &file).unwrap();

    let target = store_with("two");
    assert_eq!(import_csv(&target, &file).unwrap().imported, 1);
    assert!(matches!(
        target.fetch_credential("github"),
        Err(AegisError::DecryptionFailed)
    ));
}

#[test]
fn header_only_file_is_malformed() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("empty.csv");
    fs::write(&file, HEADER).unwrap();

    let store = store_with("pp");
    let err = import_csv(&store, &file).unwrap_err();
    assert!(matches!(err, AegisError::MalformedImport(_)));
}

#[test]
fn empty_file_is_malformed() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("empty.csv");
    fs::write(&file, "").unwrap();

    let err = import_csv(&store_with("pp"), &file).unwrap_err();
    assert!(matches!(err, AegisError::MalformedImport(_)));
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = import_csv(&store_with("pp"), &dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, AegisError::Io(_)));
}

#[test]
fn bad_row_is_skipped_and_good_row_imported() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("mixed.csv");
    let good = "site,[1 2 3],[4 5 6],[7 8 9],[10 11 12],2024-01-02 03:04:05,2024-01-02 03:04:05\n";
    let bad = "other,[1 2 x],[4 5 6],[7 8 9],[10 11 12],,\n";
    fs::write(&file, format!("{HEADER}{good}{bad}")).unwrap();

    let store = store_with("pp");
    let report = import_csv(&store, &file).unwrap();

    assert_eq!(report.imported, 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].line, 3);

    let record = store.record("site").unwrap().unwrap();
    assert_eq!(record.integrity_hash, vec![1, 2, 3]);
    assert_eq!(record.salt, vec![10, 11, 12]);
    assert!(!store.contains("other").unwrap());
}

#[test]
fn duplicate_identifier_row_is_skipped() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("dup.csv");
    let row = "site,[1],[2],[3],[4],,\n";
    fs::write(&file, format!("{HEADER}{row}{row}")).unwrap();

    let store = store_with("pp");
    let report = import_csv(&store, &file).unwrap();
    assert_eq!(report.imported, 1);
    assert_eq!(report.skipped.len(), 1);
    assert!(report.skipped[0].reason.contains("already exists"));
}
