//! Integration tests for the Aegis CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! Every vault test runs against its own `--data-dir` with the cheapest
//! Argon2 settings, and feeds passwords inline or through stdin so no
//! interactive prompt is ever shown.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const PASS_ENV: &str = "AEGIS_MASTER_PASS";

/// Helper: get a Command pointing at the aegis binary.
fn aegis() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("aegis").expect("binary should exist");
    cmd.env_remove("AEGIS_DATA_DIR").env_remove(PASS_ENV);
    cmd
}

/// Helper: a data dir with a fast-KDF config.
fn data_dir() -> TempDir {
    let tmp = TempDir::new().unwrap();
    tmp.child("aegis.toml")
        .write_str("argon2_memory_kib = 8192\nargon2_iterations = 1\nargon2_parallelism = 1\n")
        .unwrap();
    tmp
}

/// Helper: an `aegis` command bound to `dir` with the master passphrase set.
fn vault_cmd(dir: &TempDir) -> Command {
    let mut cmd = aegis();
    cmd.arg("--data-dir")
        .arg(dir.path())
        .env(PASS_ENV, "correct horse battery staple");
    cmd
}

#[test]
fn help_flag_shows_usage() {
    aegis()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Encrypted local credential vault"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("import"));
}

#[test]
fn version_flag_shows_version() {
    aegis()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("aegis"));
}

#[test]
fn no_args_shows_help() {
    aegis()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn missing_master_passphrase_fails() {
    let dir = data_dir();
    aegis()
        .arg("--data-dir")
        .arg(dir.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains(PASS_ENV));
}

#[test]
fn init_creates_database() {
    let dir = data_dir();
    vault_cmd(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Vault ready"));

    dir.child("pm.sqlite").assert(predicate::path::exists());
}

#[test]
fn init_writes_default_config_when_missing() {
    let tmp = TempDir::new().unwrap();
    let nested = tmp.child("fresh");

    // Creating the config with default (slow) Argon2 is fine: init never
    // derives a key.
    aegis()
        .arg("--data-dir")
        .arg(nested.path())
        .env(PASS_ENV, "pp")
        .arg("init")
        .assert()
        .success();

    nested
        .child("aegis.toml")
        .assert(predicate::str::contains("passphrase_env"));
}

#[test]
fn add_get_update_delete_lifecycle() {
    let dir = data_dir();

    vault_cmd(&dir)
        .args(["add", "github", "hunter2"])
        .assert()
        .success()
        .stderr(predicate::str::contains("shell history"));

    vault_cmd(&dir)
        .args(["get", "github"])
        .assert()
        .success()
        .stdout("hunter2\n");

    vault_cmd(&dir)
        .args(["update", "github"])
        .write_stdin("n3w-pass\n")
        .assert()
        .success();

    vault_cmd(&dir)
        .args(["get", "github"])
        .assert()
        .success()
        .stdout("n3w-pass\n");

    vault_cmd(&dir)
        .args(["delete", "github", "--force"])
        .assert()
        .success();

    vault_cmd(&dir)
        .args(["get", "github"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn add_duplicate_fails() {
    let dir = data_dir();
    vault_cmd(&dir).args(["add", "site", "one"]).assert().success();
    vault_cmd(&dir)
        .args(["add", "site", "two"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn wrong_passphrase_cannot_decrypt() {
    let dir = data_dir();
    vault_cmd(&dir).args(["add", "site", "pw"]).assert().success();

    aegis()
        .arg("--data-dir")
        .arg(dir.path())
        .env(PASS_ENV, "not the passphrase")
        .args(["get", "site"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Decryption failed"));
}

#[test]
fn delete_missing_warns_but_succeeds() {
    let dir = data_dir();
    vault_cmd(&dir)
        .args(["delete", "ghost", "--force"])
        .assert()
        .success()
        .stderr(predicate::str::contains("nothing deleted"));
}

#[test]
fn verify_reports_match_and_mismatch() {
    let dir = data_dir();
    vault_cmd(&dir).args(["add", "site", "pw"]).assert().success();

    vault_cmd(&dir)
        .args(["verify", "site"])
        .write_stdin("pw")
        .assert()
        .success();

    vault_cmd(&dir)
        .args(["verify", "site"])
        .write_stdin("nope")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not match"));
}

#[test]
fn list_json_shows_identifiers_without_plaintext() {
    let dir = data_dir();
    vault_cmd(&dir).args(["add", "alpha", "plain-a"]).assert().success();
    vault_cmd(&dir).args(["add", "beta", "plain-b"]).assert().success();

    vault_cmd(&dir)
        .args(["list", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"alpha\""))
        .stdout(predicate::str::contains("\"beta\""))
        .stdout(predicate::str::contains("plain-a").not());

    vault_cmd(&dir)
        .args(["list", "--reveal", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("plain-a"))
        .stdout(predicate::str::contains("plain-b"));
}

#[test]
fn export_then_import_into_new_data_dir() {
    let source = data_dir();
    vault_cmd(&source).args(["add", "github", "hunter2"]).assert().success();

    let backup = source.child("backup.csv");
    vault_cmd(&source)
        .arg("export")
        .arg(backup.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1"));
    backup.assert(predicate::str::starts_with("username,password_hash"));

    let target = data_dir();
    vault_cmd(&target)
        .arg("import")
        .arg(backup.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1"));

    vault_cmd(&target)
        .args(["get", "github"])
        .assert()
        .success()
        .stdout("hunter2\n");
}

#[test]
fn import_header_only_fails() {
    let dir = data_dir();
    let file = dir.child("empty.csv");
    file.write_str("username,password_hash,password_ciphertext,nonce,salt\n")
        .unwrap();

    vault_cmd(&dir)
        .arg("import")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed import"));
}

#[test]
fn audit_records_operations() {
    let dir = data_dir();
    vault_cmd(&dir).args(["add", "site", "pw"]).assert().success();

    vault_cmd(&dir)
        .args(["audit", "--last", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("site"));
}

#[test]
fn completions_bash_mentions_binary() {
    aegis()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("aegis"));
}

#[test]
fn import_help_shows_file_arg() {
    aegis()
        .args(["import", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FILE"));
}
