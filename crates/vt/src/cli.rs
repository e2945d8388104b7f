//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the vt CLI.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

/// vt - Query checkbox tasks in a Markdown vault
#[derive(Parser, Debug)]
#[command(name = "vt")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Report errors as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a task query against a vault
    #[command(alias = "q")]
    Query {
        /// Query text, one filter per line (read from stdin when omitted)
        query: Option<String>,

        /// Path to the vault (default: VAULT_PATH, then the config file)
        #[arg(env = "VAULT_PATH")]
        vault: Option<PathBuf>,

        /// Exclude tasks from files starting with these paths (comma separated)
        #[arg(long, alias = "filter", value_name = "PATHS")]
        exclude: Option<String>,

        /// Print one line per task instead of JSON
        #[arg(long)]
        raw: bool,

        /// Include empty date fields in JSON output
        #[arg(long)]
        full: bool,

        /// Date that relative expressions resolve against (YYYY-MM-DD)
        #[arg(long, value_name = "DATE", value_parser = parse_today)]
        today: Option<NaiveDate>,
    },

    /// View configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print config file path
    Path,
}

fn parse_today(value: &str) -> Result<NaiveDate, String> {
    vault_tasks::dates::parse_iso_date(value.trim())
        .ok_or_else(|| format!("invalid date '{value}', expected YYYY-MM-DD"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["vt", "--verbose", "config"]);
        assert!(cli.verbose);
        assert!(!cli.quiet);
        assert!(!cli.json);

        let cli = Cli::parse_from(["vt", "--quiet", "--json", "config"]);
        assert!(!cli.verbose);
        assert!(cli.quiet);
        assert!(cli.json);
    }

    #[test]
    fn test_no_color_flag() {
        let cli = Cli::parse_from(["vt", "--no-color", "config", "path"]);
        assert!(cli.no_color);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["vt", "-q", "-v", "config"]).is_err());
    }

    #[test]
    fn test_query_arguments() {
        let cli = Cli::parse_from([
            "vt",
            "query",
            "not done",
            "/tmp/vault",
            "--exclude",
            "archive,templates",
            "--raw",
            "--today",
            "2025-11-12",
        ]);
        let Commands::Query {
            query,
            vault,
            exclude,
            raw,
            full,
            today,
        } = cli.command
        else {
            panic!("expected query command");
        };
        assert_eq!(query.as_deref(), Some("not done"));
        assert_eq!(vault, Some(PathBuf::from("/tmp/vault")));
        assert_eq!(exclude.as_deref(), Some("archive,templates"));
        assert!(raw);
        assert!(!full);
        assert_eq!(today, NaiveDate::from_ymd_opt(2025, 11, 12));
    }

    #[test]
    fn test_filter_is_an_alias_for_exclude() {
        let cli = Cli::parse_from(["vt", "q", "--filter", ".claude", "done", "/tmp/vault"]);
        let Commands::Query { exclude, .. } = cli.command else {
            panic!("expected query command");
        };
        assert_eq!(exclude.as_deref(), Some(".claude"));
    }

    #[test]
    fn test_invalid_today_is_rejected() {
        assert!(Cli::try_parse_from(["vt", "query", "--today", "tomorrow", "done"]).is_err());
        assert!(Cli::try_parse_from(["vt", "query", "--today", "2025-02-30", "done"]).is_err());
    }

    #[test]
    fn test_config_subcommands() {
        let cli = Cli::parse_from(["vt", "config", "path"]);
        assert!(matches!(
            cli.command,
            Commands::Config {
                command: Some(ConfigCommands::Path)
            }
        ));

        let cli = Cli::parse_from(["vt", "config"]);
        assert!(matches!(cli.command, Commands::Config { command: None }));
    }

    #[test]
    fn test_completions_shell() {
        let cli = Cli::parse_from(["vt", "completions", "zsh"]);
        assert!(matches!(
            cli.command,
            Commands::Completions { shell: Shell::Zsh }
        ));
    }
}
