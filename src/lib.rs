// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! ck-lint - Conventional commit message linter
//!
//! Lints commit messages against a configurable rule table, with a header
//! parser that accepts an optional leading emoji and tolerates any letter
//! case in the type and scope.
//!
//! # Features
//!
//! - **Header Parser**: `[emoji] type(scope): subject`, with type and scope
//!   lowercased before validation
//! - **Rule Engine**: `[severity, condition, value]` rules in the style of
//!   commitlint, configurable from `ck-lint.toml`
//! - **Ignores**: merge, revert and autosquash commits are skipped
//! - **Hook-friendly CLI**: `ck-lint check --edit .git/COMMIT_EDITMSG`
//!
//! # Example
//!
//! ```
//! use ck_lint::parser::parse_header;
//! use ck_lint::rules::RuleEngine;
//!
//! let header = parse_header("✨ Feat(Api): add login").unwrap();
//! assert_eq!(header.emoji.as_deref(), Some("✨"));
//! assert_eq!(header.commit_type, "feat");
//! assert_eq!(header.scope.as_deref(), Some("api"));
//!
//! let result = RuleEngine::default().lint("docs: update readme.");
//! assert!(!result.is_valid());
//! ```

// Module declarations
pub mod cli;
pub mod config;
pub mod error;
pub mod parser;
pub mod rules;

// Re-exports for convenience
pub use config::LintConfig;
pub use error::{LintError, Result};
pub use parser::{parse_header, ParsedHeader};
pub use rules::{RuleEngine, ValidationResult};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of ck-lint.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, &sha[..7.min(sha.len())], date)
            }
            (Some(sha), None) => {
                format!("{} ({})", VERSION, &sha[..7.min(sha.len())])
            }
            _ => VERSION.to_string(),
        }
    }
}
