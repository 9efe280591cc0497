// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Messages that are not linted: merges, reverts and autosquash commits.

use crate::config::IgnoresConfig;
use crate::error::{ConfigError, LintError, Result};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Header patterns of messages generated by git or a forge.
    static ref DEFAULT_IGNORES: Vec<Regex> = [
        r"^(?:Merge pull request|Merge .+? into .+|Merge branch .+)$",
        r"^Merge tag .+$",
        r"^Merge remote-tracking branch\s*.*$",
        r"^Merged .+? (?:in|into) .+$",
        r"^[Rr]evert .+$",
        r"^(?:fixup|squash|amend)! .*$",
        r"^Automatic merge.*$",
        r"^Auto-merged .+? into .+$",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();
}

/// Decides whether a message should skip linting.
#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    defaults: bool,
    custom: Vec<Regex>,
}

impl Default for IgnoreMatcher {
    fn default() -> Self {
        Self {
            defaults: true,
            custom: Vec::new(),
        }
    }
}

impl IgnoreMatcher {
    /// Build a matcher from configuration.
    pub fn from_config(config: &IgnoresConfig) -> Result<Self> {
        let custom = config
            .patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|e| {
                    LintError::Config(ConfigError::InvalidValue {
                        key: "ignores.patterns".to_string(),
                        message: format!("'{}': {}", p, e),
                    })
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            defaults: config.default_ignores,
            custom,
        })
    }

    /// Check whether a (cleaned) message is ignored.
    pub fn is_ignored(&self, message: &str) -> bool {
        let header = message.lines().next().unwrap_or("");

        if self.defaults && DEFAULT_IGNORES.iter().any(|re| re.is_match(header)) {
            tracing::debug!("Ignoring generated message: {}", header);
            return true;
        }

        if let Some(re) = self.custom.iter().find(|re| re.is_match(message)) {
            tracing::debug!("Message matches ignore pattern '{}'", re.as_str());
            return true;
        }

        false
    }
}
