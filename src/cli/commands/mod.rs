//! One module per `aegis` subcommand.

pub mod add;
pub mod audit_cmd;
pub mod completions;
pub mod delete;
pub mod export;
pub mod get;
pub mod import_cmd;
pub mod init;
pub mod list;
pub mod update;
pub mod verify;
pub mod version;
