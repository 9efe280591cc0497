// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Validation result types.

use crate::cli::args::OutputFormat;
use console::{style, Style};
use serde::Serialize;

use super::severity::Severity;

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Rule name, e.g. `type-enum`.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Optional suggestion for fixing.
    pub suggestion: Option<String>,
    /// Severity of the violated rule.
    pub severity: Severity,
    /// Line number where the issue was found.
    pub line: Option<usize>,
}

impl ValidationIssue {
    /// Whether this issue blocks the commit.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Format the issue for terminal output.
    pub fn format(&self) -> String {
        let prefix = if self.is_error() {
            style("✗").red().bold()
        } else {
            style("⚠").yellow().bold()
        };

        let code_style = if self.is_error() {
            Style::new().red()
        } else {
            Style::new().yellow()
        };

        let mut output = format!(
            "{} {} {}",
            prefix,
            code_style.apply_to(format!("[{}]", self.code)),
            self.message
        );

        if let Some(ref suggestion) = self.suggestion {
            output.push_str(&format!(
                "\n  {} {}",
                style("→").dim(),
                style(suggestion).dim()
            ));
        }

        output
    }
}

/// Result of linting one commit message.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// The message that was linted (comments stripped).
    pub message: String,
    /// Where the message came from (file path, `stdin`, ...).
    pub source: Option<String>,
    /// Error-severity violations.
    pub errors: Vec<ValidationIssue>,
    /// Warning-severity violations.
    pub warnings: Vec<ValidationIssue>,
    /// Whether the message matched an ignore pattern.
    pub ignored: bool,
}

impl ValidationResult {
    /// Create a new validation result.
    pub fn new(message: String) -> Self {
        Self {
            message,
            source: None,
            errors: Vec::new(),
            warnings: Vec::new(),
            ignored: false,
        }
    }

    /// Record an issue under errors or warnings according to its severity.
    pub fn push(&mut self, issue: ValidationIssue) {
        match issue.severity {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
            Severity::Off => {}
        }
    }

    /// Check if the validation passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether the result passes, optionally treating warnings as errors.
    pub fn passes(&self, strict: bool) -> bool {
        self.is_valid() && !(strict && !self.warnings.is_empty())
    }

    /// Get the total number of issues.
    pub fn issue_count(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    /// Find an issue by rule name.
    pub fn issue(&self, code: &str) -> Option<&ValidationIssue> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .find(|i| i.code == code)
    }

    /// Print the result to stdout.
    pub fn print(&self, format: Option<OutputFormat>, help_url: Option<&str>) {
        match format {
            Some(OutputFormat::Json) => self.print_json(),
            _ => self.print_text(help_url),
        }
    }

    /// Print in text format.
    fn print_text(&self, help_url: Option<&str>) {
        let header = self.message.lines().next().unwrap_or("");
        let status = if self.ignored {
            style("○").dim()
        } else if self.is_valid() {
            style("✓").green().bold()
        } else {
            style("✗").red().bold()
        };
        match self.source {
            Some(ref source) => println!("{} {} {}", status, style(source).cyan(), header),
            None => println!("{} {}", status, header),
        }

        for error in &self.errors {
            println!("  {}", error.format());
        }

        for warning in &self.warnings {
            println!("  {}", warning.format());
        }

        if self.issue_count() > 0 {
            println!();
            println!("  {}", style(self.summary()).bold());
            if let Some(url) = help_url {
                println!("  {} {}", style("ⓘ Get help:").dim(), url);
            }
        }
    }

    /// Print in JSON format.
    fn print_json(&self) {
        println!(
            "{}",
            serde_json::to_string_pretty(&self.to_json()).unwrap_or_default()
        );
    }

    /// JSON representation of the result.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "valid": self.is_valid(),
            "ignored": self.ignored,
            "source": self.source,
            "message": self.message,
            "errors": self.errors,
            "warnings": self.warnings,
        })
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        if self.ignored {
            return "Ignored".to_string();
        }
        if self.is_valid() {
            if self.warnings.is_empty() {
                "Valid".to_string()
            } else {
                format!("Valid ({} warnings)", self.warnings.len())
            }
        } else {
            format!(
                "Invalid ({} errors, {} warnings)",
                self.errors.len(),
                self.warnings.len()
            )
        }
    }
}
