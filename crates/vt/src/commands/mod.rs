//! Command implementations for the vt CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod completions;
pub mod config;
pub mod query;

use std::env;
use std::io::{self, IsTerminal};

use crate::cli::Cli;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// The query text did not parse.
    #[error("{0}")]
    Query(#[from] vault_tasks::QueryError),

    /// The vault could not be scanned.
    #[error("{0}")]
    Vault(#[from] vault_tasks::SourceError),

    /// Invalid combination of arguments.
    #[error("{0}")]
    Usage(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<vault_tasks::Error> for CommandError {
    fn from(err: vault_tasks::Error) -> Self {
        match err {
            vault_tasks::Error::Query(e) => CommandError::Query(e),
            vault_tasks::Error::Source(e) => CommandError::Vault(e),
        }
    }
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments.
    ///
    /// Colors are only used when stdout is a terminal and `NO_COLOR` is unset.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color
                && env::var_os("NO_COLOR").is_none()
                && io::stdout().is_terminal(),
            quiet: cli.quiet,
        }
    }
}
