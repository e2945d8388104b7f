//! Query command implementation.
//!
//! Runs a task query against a vault and prints the matching tasks.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing::{debug, warn};
use vault_tasks::{query_with_reference, Task, VaultScanner};

use super::config::Config;
use super::{CommandContext, CommandError, Result};
use crate::output::{format_tasks_json, format_tasks_raw};

/// Options for the query command.
pub struct QueryOptions {
    /// Query text; read from stdin when absent.
    pub query: Option<String>,
    /// Vault root given on the command line or through `VAULT_PATH`.
    pub vault: Option<PathBuf>,
    /// Comma-separated path prefixes to exclude.
    pub exclude: Option<String>,
    /// Print raw lines instead of JSON.
    pub raw: bool,
    /// Include empty date fields in JSON.
    pub full: bool,
    /// Reference date for relative expressions.
    pub today: Option<NaiveDate>,
}

/// Executes the query command.
pub fn execute(ctx: &CommandContext, opts: &QueryOptions, config: &Config) -> Result<()> {
    let vault = resolve_vault(opts.vault.as_deref(), config)?;

    let mut excluded = match opts.exclude.as_deref() {
        Some(value) => parse_exclude(value)?,
        None => Vec::new(),
    };
    excluded.extend(config.query.exclude.iter().cloned());

    let query_text = match &opts.query {
        Some(text) => text.clone(),
        None => read_stdin()?,
    };
    let today = opts.today.unwrap_or_else(|| Local::now().date_naive());

    let scanner = VaultScanner::with_root(vault);
    debug!(vault = %scanner.root().display(), %today, excluded = excluded.len(), "running query");

    let tasks = query_with_reference(&scanner, &query_text, today)?;
    let tasks = exclude_paths(tasks, &excluded);

    if opts.raw {
        if tasks.is_empty() {
            if !ctx.quiet {
                eprintln!("No tasks found matching query.");
            }
            return Ok(());
        }

        let use_colors = ctx.use_colors && config.output.color.unwrap_or(true);
        print!("{}", format_tasks_raw(&tasks, today, use_colors));
        if !ctx.quiet {
            eprintln!("\nFound {} task(s)", tasks.len());
        }
    } else {
        let full = opts.full || config.output.full.unwrap_or(false);
        println!("{}", format_tasks_json(&tasks, full)?);
    }

    Ok(())
}

/// Settles the config for a query.
///
/// A config file that fails to load only stops the query when the vault has
/// to come from it; otherwise it is reported and defaults are used.
pub fn config_for_query(cli_vault: Option<&Path>, loaded: Result<Config>) -> Result<Config> {
    match loaded {
        Ok(config) => Ok(config),
        Err(err) if cli_vault.is_some() => {
            warn!(error = %err, "ignoring config file");
            Ok(Config::default())
        }
        Err(err) => Err(err),
    }
}

/// Picks the vault root: command line (or `VAULT_PATH`), then the config file.
fn resolve_vault(cli_vault: Option<&Path>, config: &Config) -> Result<PathBuf> {
    cli_vault
        .map(Path::to_path_buf)
        .or_else(|| config.vault_path.clone())
        .ok_or_else(|| {
            CommandError::Config(
                "vault path not provided (pass it as an argument, set VAULT_PATH, or set vault_path in the config file)"
                    .to_string(),
            )
        })
}

/// Splits a comma-separated prefix list, dropping empty entries.
fn parse_exclude(value: &str) -> Result<Vec<String>> {
    let prefixes: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect();

    if prefixes.is_empty() {
        return Err(CommandError::Usage(
            "--exclude requires at least one non-empty path".to_string(),
        ));
    }
    Ok(prefixes)
}

/// Drops tasks whose file path starts with any of `prefixes`.
fn exclude_paths(mut tasks: Vec<Task>, prefixes: &[String]) -> Vec<Task> {
    if !prefixes.is_empty() {
        tasks.retain(|task| !prefixes.iter().any(|p| task.file_path.starts_with(p.as_str())));
    }
    tasks
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf.trim().to_string())
}
