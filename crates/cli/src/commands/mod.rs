//! Subcommand implementations.

pub mod health;
pub mod init;
pub mod run;
