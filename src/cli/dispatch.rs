// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use std::io::{IsTerminal, Read};

use console::style;

use crate::config::{CommitType, LintConfig};
use crate::error::{ConfigError, LintError, Result, ResultExt, ValidationError};
use crate::rules::{RuleEngine, RuleSetting, Severity, ValidationResult};

use super::args::{CheckArgs, Cli, Commands, InitArgs, OutputFormat, ParseArgs};

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    // Load configuration
    let config = if let Some(config_path) = &cli.config {
        LintConfig::load_from(config_path)?
    } else {
        LintConfig::load()?
    };

    if cli.no_color || !config.ui.color {
        console::set_colors_enabled(false);
    }

    // Dispatch to the appropriate command handler
    match cli.effective_command() {
        Commands::Check(args) => run_check(&cli, &config, args),
        Commands::Parse(args) => run_parse(&cli, &config, args),
        Commands::Rules => run_rules(&cli, &config),
        Commands::Init(args) => run_init(args),
        Commands::Version => run_version(),
    }
}

/// Run the check command.
fn run_check(cli: &Cli, config: &LintConfig, args: CheckArgs) -> Result<()> {
    tracing::debug!("Running check command with args: {:?}", args);

    let engine = RuleEngine::new(config)?;
    let strict = cli.strict || config.strict;

    let result = if let Some(ref message) = args.message {
        engine.lint(message)
    } else if let Some(ref path) = args.edit {
        engine.lint_file(path)?
    } else {
        let mut result = engine.lint(&read_stdin()?);
        result.source = Some("stdin".to_string());
        result
    };

    result.print(cli.format, config.help_url.as_deref());
    outcome(&result, strict)
}

/// Turn a lint result into the process outcome.
fn outcome(result: &ValidationResult, strict: bool) -> Result<()> {
    if result.passes(strict) {
        Ok(())
    } else {
        Err(LintError::Validation(ValidationError::Failed {
            errors: result.errors.len(),
            warnings: result.warnings.len(),
        }))
    }
}

fn read_stdin() -> Result<String> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Err(LintError::WithContext {
            context: "check".to_string(),
            message: "No commit message given. Pass MESSAGE, --edit <FILE>, or pipe it on stdin"
                .to_string(),
        });
    }

    let mut message = String::new();
    stdin
        .read_to_string(&mut message)
        .context("Failed to read stdin")?;
    Ok(message)
}

/// Run the parse command.
fn run_parse(cli: &Cli, config: &LintConfig, args: ParseArgs) -> Result<()> {
    tracing::debug!("Running parse command with args: {:?}", args);

    let engine = RuleEngine::new(config)?;
    let parsed = engine.parser().parse(&args.header)?;

    match cli.format {
        Some(OutputFormat::Json) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&parsed).unwrap_or_default()
            );
        }
        _ => {
            let none = style("-").dim().to_string();
            println!("emoji:   {}", parsed.emoji.as_deref().unwrap_or(&none));
            println!(
                "type:    {} {}",
                parsed.commit_type,
                style(describe_type(&parsed.commit_type)).dim()
            );
            println!("scope:   {}", parsed.scope.as_deref().unwrap_or(&none));
            println!("subject: {}", parsed.subject);
        }
    }

    Ok(())
}

/// Short description of a parsed type keyword.
fn describe_type(keyword: &str) -> String {
    match CommitType::from_keyword(keyword) {
        Some(t) => format!("({})", t.description()),
        None => "(not a standard type)".to_string(),
    }
}

/// Run the rules command.
fn run_rules(cli: &Cli, config: &LintConfig) -> Result<()> {
    let engine = RuleEngine::new(config)?;

    if let Some(OutputFormat::Json) = cli.format {
        let table: serde_json::Map<String, serde_json::Value> = engine
            .rules()
            .map(|(kind, setting)| {
                (
                    kind.as_str().to_string(),
                    serde_json::to_value(setting).unwrap_or_default(),
                )
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&table).unwrap_or_default()
        );
        return Ok(());
    }

    for (kind, setting) in engine.rules() {
        println!("{:<24} {}", kind.as_str(), format_setting(setting));
    }

    if config.ui.emoji {
        println!();
        println!("{}", style("Commit types:").bold());
        for t in CommitType::all() {
            println!("  {}  {:<10} {}", t.emoji(), t.as_str(), style(t.description()).dim());
        }
    }

    Ok(())
}

fn format_setting(setting: &RuleSetting) -> String {
    let text = setting.to_string();
    match setting.severity {
        Severity::Error => style(text).red().to_string(),
        Severity::Warning => style(text).yellow().to_string(),
        Severity::Off => style(text).dim().to_string(),
    }
}

/// Run the init command.
fn run_init(args: InitArgs) -> Result<()> {
    use crate::config::example_config;

    tracing::debug!("Running init command with args: {:?}", args);

    if args.path.exists() && !args.force {
        return Err(LintError::Config(ConfigError::AlreadyExists { path: args.path }));
    }

    std::fs::write(&args.path, example_config()).context("Failed to write configuration")?;

    println!("✓ Created {}", args.path.display());

    Ok(())
}

/// Run the version command.
fn run_version() -> Result<()> {
    println!("ck-lint {}", crate::version::version_string());

    if let Some(sha) = crate::version::GIT_SHA {
        println!("git commit: {}", sha);
    }
    if let Some(date) = crate::version::GIT_COMMIT_DATE {
        println!("commit date: {}", date);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome() {
        let engine = RuleEngine::default();
        assert!(outcome(&engine.lint("feat: add login"), false).is_ok());
        assert!(outcome(&engine.lint("wip: add login"), false).is_err());

        let warned = engine.lint("feat: add login\nbody without blank line");
        assert!(outcome(&warned, false).is_ok());
        assert!(outcome(&warned, true).is_err());
    }

    #[test]
    fn test_describe_type() {
        assert_eq!(describe_type("feat"), "(A new feature)");
        assert_eq!(describe_type("wip"), "(not a standard type)");
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ck-lint.toml");

        run_init(InitArgs {
            force: false,
            path: path.clone(),
        })
        .unwrap();
        assert!(LintConfig::load_from(&path).is_ok());

        let again = run_init(InitArgs {
            force: false,
            path: path.clone(),
        });
        assert!(matches!(
            again,
            Err(LintError::Config(ConfigError::AlreadyExists { .. }))
        ));

        assert!(run_init(InitArgs { force: true, path }).is_ok());
    }
}
