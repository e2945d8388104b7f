use clap::Parser;
use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands, ConfigCommands};
use commands::config::load_config;
use commands::query::QueryOptions;
use commands::{CommandContext, CommandError};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                eprintln!("{error_json:#}");
            } else {
                eprintln!("Error: {e}");
            }
            error_exit_code(&e)
        }
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over the verbosity flags.
fn init_tracing(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> commands::Result<()> {
    let ctx = CommandContext::from_cli(cli);

    match &cli.command {
        Commands::Query {
            query,
            vault,
            exclude,
            raw,
            full,
            today,
        } => {
            let config = commands::query::config_for_query(vault.as_deref(), load_config())?;
            let opts = QueryOptions {
                query: query.clone(),
                vault: vault.clone(),
                exclude: exclude.clone(),
                raw: *raw,
                full: *full,
                today: *today,
            };
            commands::query::execute(&ctx, &opts, &config)
        }
        Commands::Config { command } => match command {
            None | Some(ConfigCommands::Show) => commands::config::execute_show(&ctx),
            Some(ConfigCommands::Path) => commands::config::execute_path(&ctx),
        },
        Commands::Completions { shell } => Ok(commands::completions::execute(shell)?),
    }
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Query(_) => "QUERY_ERROR",
        CommandError::Vault(_) => "VAULT_ERROR",
        CommandError::Usage(_) => "USAGE_ERROR",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    ExitCode::from(exit_status(e))
}

fn exit_status(e: &CommandError) -> u8 {
    match e {
        CommandError::Query(_) | CommandError::Usage(_) | CommandError::Json(_) => 1,
        CommandError::Vault(_) | CommandError::Io(_) => 3,
        CommandError::Config(_) => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use vault_tasks::{QueryError, SourceError};

    fn query_error() -> CommandError {
        CommandError::Query(QueryError {
            lines: vec!["bogus".to_string()],
        })
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(error_code(&query_error()), "QUERY_ERROR");
        assert_eq!(
            error_code(&CommandError::Usage("bad".to_string())),
            "USAGE_ERROR"
        );
        assert_eq!(
            error_code(&CommandError::Config("bad".to_string())),
            "CONFIG_ERROR"
        );
    }

    #[test]
    fn test_exit_statuses() {
        assert_eq!(exit_status(&query_error()), 1);
        assert_eq!(exit_status(&CommandError::Usage("bad".to_string())), 1);
        assert_eq!(
            exit_status(&CommandError::Vault(SourceError::NotFound {
                path: PathBuf::from("/nowhere"),
            })),
            3
        );
        assert_eq!(
            exit_status(&CommandError::Io(io::Error::other("boom"))),
            3
        );
        assert_eq!(exit_status(&CommandError::Config("bad".to_string())), 5);
    }

    #[test]
    fn test_library_errors_convert() {
        let err: CommandError = vault_tasks::Error::Source(SourceError::NotADirectory {
            path: PathBuf::from("/etc/hosts"),
        })
        .into();
        assert!(matches!(err, CommandError::Vault(_)));
        assert!(err.to_string().contains("not a directory"));
    }
}
