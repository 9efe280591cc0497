// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for ck-lint.
//!
//! Lint failures (rule violations, unparseable headers) are data, not errors:
//! they are reported through [`crate::rules::ValidationResult`]. The types in
//! this module cover everything that stops the linter from producing a report.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for ck-lint operations.
#[derive(Error, Debug)]
pub enum LintError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Header/message parsing errors
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    // Lint outcome errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Unknown rule: '{rule}'")]
    UnknownRule { rule: String },

    #[error("Invalid header pattern: {message}")]
    InvalidPattern { message: String },

    #[error("Configuration file already exists: {path}")]
    AlreadyExists { path: PathBuf },
}

/// Parsing-related errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Header does not match the expected format: '{header}'")]
    NoMatch { header: String },
}

/// Lint outcome errors, raised by the CLI to produce a failing exit status.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{errors} error(s), {warnings} warning(s) found")]
    Failed { errors: usize, warnings: usize },
}

/// Result type alias for ck-lint operations.
pub type Result<T> = std::result::Result<T, LintError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| LintError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}
