// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ck-lint - Conventional commit message linter
///
/// Validates commit headers of the form `[emoji] type(scope): subject`.
#[derive(Parser, Debug)]
#[command(name = "ck-lint")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Conventional commit message linter", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to run (defaults to check if not specified)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Treat warnings as errors
    #[arg(long, global = true)]
    pub strict: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format for machine-readable output
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "CK_LINT_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Output format for CI and scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output (default)
    Text,
    /// JSON output for machine parsing
    Json,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Lint a commit message (default command)
    Check(CheckArgs),

    /// Parse a commit header and print its fields
    Parse(ParseArgs),

    /// Print the effective rule table
    Rules,

    /// Initialize ck-lint configuration
    Init(InitArgs),

    /// Print version information
    Version,
}

/// Arguments for the check command.
#[derive(Parser, Debug, Default, Clone)]
pub struct CheckArgs {
    /// Commit message to lint (reads stdin when omitted)
    #[arg(conflicts_with = "edit")]
    pub message: Option<String>,

    /// Read the message from a file, e.g. .git/COMMIT_EDITMSG in a commit-msg hook
    #[arg(short, long, value_name = "FILE")]
    pub edit: Option<PathBuf>,
}

/// Arguments for the parse command.
#[derive(Parser, Debug, Clone)]
pub struct ParseArgs {
    /// Commit header to parse
    pub header: String,
}

/// Arguments for the init command.
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Where to write the configuration
    #[arg(long, default_value = "ck-lint.toml")]
    pub path: PathBuf,
}

impl Cli {
    /// Get the effective command, defaulting to Check if none specified.
    pub fn effective_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Check(CheckArgs::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check_message() {
        let args = Cli::parse_from(["ck-lint", "check", "feat: add login"]);
        if let Some(Commands::Check(check_args)) = args.command {
            assert_eq!(check_args.message.as_deref(), Some("feat: add login"));
            assert!(check_args.edit.is_none());
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_parse_check_edit() {
        let args = Cli::parse_from(["ck-lint", "check", "--edit", ".git/COMMIT_EDITMSG"]);
        if let Some(Commands::Check(check_args)) = args.command {
            assert_eq!(
                check_args.edit,
                Some(PathBuf::from(".git/COMMIT_EDITMSG"))
            );
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_message_conflicts_with_edit() {
        let result = Cli::try_parse_from(["ck-lint", "check", "feat: x", "--edit", "msg.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_parse() {
        let args = Cli::parse_from(["ck-lint", "parse", "FIX: crash", "--format", "json"]);
        assert!(matches!(args.command, Some(Commands::Parse(_))));
        assert_eq!(args.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_global_flags() {
        let args = Cli::parse_from(["ck-lint", "--strict", "--no-color", "rules"]);
        assert!(args.strict);
        assert!(args.no_color);
        assert!(matches!(args.command, Some(Commands::Rules)));
    }

    #[test]
    fn test_default_command() {
        let args = Cli::parse_from(["ck-lint"]);
        assert!(args.command.is_none());
        assert!(matches!(args.effective_command(), Commands::Check(_)));
    }
}
