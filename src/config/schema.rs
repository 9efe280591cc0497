// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines all configuration structures that can be loaded from ck-lint.toml.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::parser::HeaderField;
use crate::rules::RuleSetting;

/// The main configuration structure for ck-lint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LintConfig {
    /// Treat warnings as errors.
    pub strict: bool,

    /// Link printed under failing reports.
    pub help_url: Option<String>,

    /// Rule overrides, layered over the default rule table.
    pub rules: BTreeMap<String, RuleSetting>,

    /// Header parser customization.
    pub parser: ParserConfig,

    /// Messages that skip linting.
    pub ignores: IgnoresConfig,

    /// UI/UX configuration.
    pub ui: UiConfig,
}

impl LintConfig {
    /// Load configuration from the default locations.
    pub fn load() -> crate::error::Result<Self> {
        super::loader::load_config()
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &std::path::Path) -> crate::error::Result<Self> {
        super::loader::load_config_from(path)
    }
}

/// Header parser configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Custom header regex; the built-in emoji-aware pattern when unset.
    pub header_pattern: Option<String>,

    /// Field names for the pattern's capture groups, in order.
    pub header_correspondence: Vec<HeaderField>,

    /// Fields lowercased after matching.
    pub lowercase: Vec<HeaderField>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            header_pattern: None,
            header_correspondence: HeaderField::default_correspondence(),
            lowercase: HeaderField::default_lowercase(),
        }
    }
}

/// Ignore configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoresConfig {
    /// Skip merge, revert, fixup! and squash! messages.
    pub default_ignores: bool,

    /// Extra regexes matched against the whole message.
    pub patterns: Vec<String>,
}

impl Default for IgnoresConfig {
    fn default() -> Self {
        Self {
            default_ignores: true,
            patterns: Vec::new(),
        }
    }
}

/// UI/UX configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Whether to use colors.
    pub color: bool,

    /// Whether to show type emoji in listings.
    pub emoji: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color: true,
            emoji: true,
        }
    }
}

/// Commit type definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Build,
    Ci,
    Chore,
    Revert,
}

impl CommitType {
    /// Get the string representation of the commit type.
    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Docs => "docs",
            CommitType::Style => "style",
            CommitType::Refactor => "refactor",
            CommitType::Perf => "perf",
            CommitType::Test => "test",
            CommitType::Build => "build",
            CommitType::Ci => "ci",
            CommitType::Chore => "chore",
            CommitType::Revert => "revert",
        }
    }

    /// Get a description of the commit type.
    pub fn description(&self) -> &'static str {
        match self {
            CommitType::Feat => "A new feature",
            CommitType::Fix => "A bug fix",
            CommitType::Docs => "Documentation only changes",
            CommitType::Style => "Formatting, no code change",
            CommitType::Refactor => "Code refactoring (no feature/fix)",
            CommitType::Perf => "Performance improvements",
            CommitType::Test => "Adding or fixing tests",
            CommitType::Build => "Build system changes",
            CommitType::Ci => "CI/CD changes",
            CommitType::Chore => "Maintenance tasks",
            CommitType::Revert => "Reverting a previous commit",
        }
    }

    /// Conventional emoji for the type.
    pub fn emoji(&self) -> &'static str {
        match self {
            CommitType::Feat => "✨",
            CommitType::Fix => "🐛",
            CommitType::Docs => "📚",
            CommitType::Style => "💄",
            CommitType::Refactor => "♻️",
            CommitType::Perf => "⚡",
            CommitType::Test => "✅",
            CommitType::Build => "🔧",
            CommitType::Ci => "🚀",
            CommitType::Chore => "🔧",
            CommitType::Revert => "⏪",
        }
    }

    /// Get all commit types.
    pub fn all() -> &'static [CommitType] {
        &[
            CommitType::Feat,
            CommitType::Fix,
            CommitType::Docs,
            CommitType::Style,
            CommitType::Refactor,
            CommitType::Perf,
            CommitType::Test,
            CommitType::Build,
            CommitType::Ci,
            CommitType::Chore,
            CommitType::Revert,
        ]
    }

    /// Membership check for an already normalized keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        CommitType::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == keyword)
    }
}

impl std::str::FromStr for CommitType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CommitType::from_keyword(&s.to_lowercase()).ok_or(())
    }
}

impl std::fmt::Display for CommitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LintConfig::default();
        assert!(config.rules.is_empty());
        assert!(config.ignores.default_ignores);
        assert!(!config.strict);
        assert_eq!(config.parser.header_correspondence.len(), 4);
    }

    #[test]
    fn test_commit_type_from_str() {
        assert_eq!("feat".parse::<CommitType>(), Ok(CommitType::Feat));
        assert_eq!("FIX".parse::<CommitType>(), Ok(CommitType::Fix));
        assert!("wip".parse::<CommitType>().is_err());
        assert!("feature".parse::<CommitType>().is_err());
    }

    #[test]
    fn test_closed_set() {
        assert_eq!(CommitType::all().len(), 11);
        for t in CommitType::all() {
            assert_eq!(CommitType::from_keyword(t.as_str()), Some(*t));
        }
        assert_eq!(CommitType::from_keyword("Feat"), None);
    }

    #[test]
    fn test_commit_type_display() {
        assert_eq!(CommitType::Feat.to_string(), "feat");
        assert_eq!(CommitType::Refactor.to_string(), "refactor");
    }

    #[test]
    fn test_config_serialization() {
        let config = LintConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("default_ignores"));
        assert!(toml_str.contains("header_correspondence"));
    }
}
