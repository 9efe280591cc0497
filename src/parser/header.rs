// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Header parsing and normalization.
//!
//! The header (first line of a commit message) is matched against a pattern
//! whose capture groups are mapped onto [`HeaderField`]s. Matching is
//! case-insensitive; afterwards `type` and `scope` are lowercased so that the
//! rules downstream only ever compare lowercase keywords. The subject and the
//! emoji are never touched.

use crate::config::ParserConfig;
use crate::error::{ConfigError, LintError, ParseError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// The built-in header pattern.
///
/// Groups: optional emoji sequence, type keyword, optional `(scope)`, subject.
/// An emoji sequence is a flag (two regional indicators), a keycap, or a
/// non-ASCII emoji code point with its tag sequence (subdivision flags),
/// variation selectors, skin-tone modifiers and ZWJ continuations.
pub const DEFAULT_HEADER_PATTERN: &str = concat!(
    r"(?i)^(",
    r"[\x{1F1E6}-\x{1F1FF}]{2}",
    r"|[0-9#*]\x{FE0F}?\x{20E3}",
    r"|[\p{Emoji}--[\x00-\x7F]](?:[\x{E0020}-\x{E007E}]+\x{E007F})?",
    r"[\x{FE0F}\x{20E3}\p{Emoji_Modifier}]*",
    r"(?:\x{200D}\p{Emoji}[\x{FE0F}\x{20E3}\p{Emoji_Modifier}]*)*",
    r")?\s*",
    r"(feat|fix|docs|style|refactor|perf|test|build|ci|chore|revert)",
    r"(\([a-z0-9-]+\))?",
    r":\s(.+)$",
);

lazy_static! {
    static ref DEFAULT_HEADER_REGEX: Regex = Regex::new(DEFAULT_HEADER_PATTERN).unwrap();
}

/// A field a header capture group can be mapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderField {
    Emoji,
    Type,
    Scope,
    Subject,
}

impl HeaderField {
    /// Get the field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderField::Emoji => "emoji",
            HeaderField::Type => "type",
            HeaderField::Scope => "scope",
            HeaderField::Subject => "subject",
        }
    }

    /// The default group-to-field correspondence.
    pub fn default_correspondence() -> Vec<HeaderField> {
        vec![
            HeaderField::Emoji,
            HeaderField::Type,
            HeaderField::Scope,
            HeaderField::Subject,
        ]
    }

    /// The fields lowercased by the default transform.
    pub fn default_lowercase() -> Vec<HeaderField> {
        vec![HeaderField::Type, HeaderField::Scope]
    }
}

impl std::fmt::Display for HeaderField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed, normalized commit header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedHeader {
    /// Leading emoji, if present.
    pub emoji: Option<String>,
    /// Commit type, lowercase after normalization.
    #[serde(rename = "type")]
    pub commit_type: String,
    /// Scope without the parentheses, lowercase after normalization.
    pub scope: Option<String>,
    /// Subject, case preserved.
    pub subject: String,
}

/// Lowercase a keyword. Total and idempotent.
pub fn normalize_keyword(value: &str) -> String {
    value.to_lowercase()
}

/// Compiled header parser: pattern, correspondence and transform.
#[derive(Debug, Clone)]
pub struct HeaderParser {
    pattern: Regex,
    correspondence: Vec<HeaderField>,
    lowercase: Vec<HeaderField>,
}

impl Default for HeaderParser {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_HEADER_REGEX.clone(),
            correspondence: HeaderField::default_correspondence(),
            lowercase: HeaderField::default_lowercase(),
        }
    }
}

impl HeaderParser {
    /// Create a parser with the built-in pattern and transform.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a parser from configuration.
    pub fn from_config(config: &ParserConfig) -> Result<Self> {
        let pattern = match config.header_pattern {
            Some(ref custom) => Regex::new(custom).map_err(|e| {
                LintError::Config(ConfigError::InvalidPattern {
                    message: e.to_string(),
                })
            })?,
            None => DEFAULT_HEADER_REGEX.clone(),
        };

        let groups = pattern.captures_len() - 1;
        if config.header_correspondence.len() > groups {
            return Err(LintError::Config(ConfigError::InvalidValue {
                key: "parser.header_correspondence".to_string(),
                message: format!(
                    "{} fields listed but the pattern has {} groups",
                    config.header_correspondence.len(),
                    groups
                ),
            }));
        }
        if !config
            .header_correspondence
            .contains(&HeaderField::Type)
        {
            return Err(LintError::Config(ConfigError::InvalidValue {
                key: "parser.header_correspondence".to_string(),
                message: "a 'type' field is required".to_string(),
            }));
        }

        if let Some(field) = config
            .lowercase
            .iter()
            .find(|f| !matches!(f, HeaderField::Type | HeaderField::Scope))
        {
            return Err(LintError::Config(ConfigError::InvalidValue {
                key: "parser.lowercase".to_string(),
                message: format!("'{}' cannot be normalized", field),
            }));
        }

        tracing::debug!(
            "Header parser: {} groups mapped to {:?}",
            groups,
            config.header_correspondence
        );

        Ok(Self {
            pattern,
            correspondence: config.header_correspondence.clone(),
            lowercase: config.lowercase.clone(),
        })
    }

    /// Parse and normalize a header line.
    pub fn parse(&self, header: &str) -> std::result::Result<ParsedHeader, ParseError> {
        let captures = self
            .pattern
            .captures(header)
            .ok_or_else(|| ParseError::NoMatch {
                header: header.to_string(),
            })?;

        let mut parsed = ParsedHeader {
            emoji: None,
            commit_type: String::new(),
            scope: None,
            subject: String::new(),
        };

        for (index, field) in self.correspondence.iter().enumerate() {
            let Some(value) = captures.get(index + 1).map(|m| m.as_str()) else {
                continue;
            };
            match field {
                HeaderField::Emoji => parsed.emoji = Some(value.to_string()),
                HeaderField::Type => parsed.commit_type = value.to_string(),
                HeaderField::Scope => parsed.scope = Some(strip_parens(value).to_string()),
                HeaderField::Subject => parsed.subject = value.to_string(),
            }
        }

        Ok(self.transform(parsed))
    }

    /// Apply the normalization transform.
    pub fn transform(&self, mut parsed: ParsedHeader) -> ParsedHeader {
        for field in &self.lowercase {
            match field {
                HeaderField::Type => parsed.commit_type = normalize_keyword(&parsed.commit_type),
                HeaderField::Scope => {
                    parsed.scope = parsed.scope.as_deref().map(normalize_keyword);
                }
                HeaderField::Emoji | HeaderField::Subject => {}
            }
        }
        parsed
    }
}

/// Parse a header with the built-in parser.
pub fn parse_header(header: &str) -> std::result::Result<ParsedHeader, ParseError> {
    HeaderParser::default().parse(header)
}

fn strip_parens(scope: &str) -> &str {
    scope
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or(scope)
}
