// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine for commit validation.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use crate::config::{default_rules, LintConfig};
use crate::error::{Result, ResultExt};
use crate::parser::{Commit, HeaderParser};

use super::builtin::{apply_builtin_rule, Rule, RuleKind};
use super::ignore::IgnoreMatcher;
use super::severity::RuleSetting;
use super::validator::ValidationResult;

/// Rule engine for validating commit messages.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    parser: HeaderParser,
    rules: BTreeMap<RuleKind, RuleSetting>,
    ignores: IgnoreMatcher,
    custom_rules: Vec<Arc<dyn Rule>>,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self {
            parser: HeaderParser::default(),
            rules: default_rules().into_iter().collect(),
            ignores: IgnoreMatcher::default(),
            custom_rules: Vec::new(),
        }
    }
}

impl RuleEngine {
    /// Create a rule engine from configuration.
    ///
    /// Configured rules are layered over the default rule table.
    pub fn new(config: &LintConfig) -> Result<Self> {
        Ok(Self {
            parser: HeaderParser::from_config(&config.parser)?,
            rules: resolve_rules(config)?,
            ignores: IgnoreMatcher::from_config(&config.ignores)?,
            custom_rules: Vec::new(),
        })
    }

    /// Add a custom rule to the engine.
    pub fn add_rule(&mut self, rule: Arc<dyn Rule>) {
        self.custom_rules.push(rule);
    }

    /// The effective rule table.
    pub fn rules(&self) -> impl Iterator<Item = (RuleKind, &RuleSetting)> {
        self.rules.iter().map(|(kind, setting)| (*kind, setting))
    }

    /// The header parser in use.
    pub fn parser(&self) -> &HeaderParser {
        &self.parser
    }

    /// Parse a message with the configured header parser.
    pub fn parse(&self, message: &str) -> Commit {
        Commit::parse(message, &self.parser)
    }

    /// Lint a commit message string.
    pub fn lint(&self, message: &str) -> ValidationResult {
        let commit = self.parse(message);

        if self.ignores.is_ignored(&commit.raw) {
            let mut result = ValidationResult::new(commit.raw);
            result.ignored = true;
            return result;
        }

        self.validate(&commit)
    }

    /// Validate an already parsed commit.
    pub fn validate(&self, commit: &Commit) -> ValidationResult {
        let mut result = ValidationResult::new(commit.raw.clone());

        for (kind, setting) in &self.rules {
            if let Some(issue) = apply_builtin_rule(*kind, setting, commit) {
                tracing::debug!("{} violated: {}", kind, issue.message);
                result.push(issue);
            }
        }

        for rule in &self.custom_rules {
            if let Some(issue) = rule.check(commit) {
                tracing::debug!("{} violated: {}", rule.name(), issue.message);
                result.push(issue);
            }
        }

        result
    }

    /// Lint the message stored in a file, e.g. `.git/COMMIT_EDITMSG`.
    pub fn lint_file(&self, path: &Path) -> Result<ValidationResult> {
        tracing::debug!("Reading commit message from: {:?}", path);
        let message = std::fs::read_to_string(path)
            .context(format!("Failed to read {}", path.display()))?;

        let mut result = self.lint(&message);
        result.source = Some(path.display().to_string());
        Ok(result)
    }
}

/// Layer the configured rules over the defaults and validate them.
fn resolve_rules(config: &LintConfig) -> Result<BTreeMap<RuleKind, RuleSetting>> {
    let mut rules: BTreeMap<RuleKind, RuleSetting> = default_rules().into_iter().collect();

    for (name, setting) in &config.rules {
        let kind: RuleKind = name.parse()?;
        if setting.is_enabled() {
            kind.validate_setting(setting)?;
        }
        rules.insert(kind, setting.clone());
    }

    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::rules::severity::Severity;
    use crate::rules::validator::ValidationIssue;

    #[test]
    fn test_valid_header() {
        let engine = RuleEngine::default();
        let result = engine.lint("feat(api): add login");
        assert!(result.is_valid());
        assert_eq!(result.issue_count(), 0);
    }

    #[test]
    fn test_emoji_header() {
        let engine = RuleEngine::default();
        let result = engine.lint("✨ Feat(Auth): Add OAuth login");
        assert!(result.is_valid(), "{:?}", result.errors);
    }

    #[test]
    fn test_trailing_period() {
        let engine = RuleEngine::default();
        let result = engine.lint("docs: update readme.");
        assert!(!result.is_valid());
        let issue = result.issue("subject-full-stop").unwrap();
        assert_eq!(issue.severity, Severity::Error);
    }

    #[test]
    fn test_unknown_type() {
        let engine = RuleEngine::default();
        let result = engine.lint("wip: something");
        assert!(!result.is_valid());
        let issue = result.issue("type-enum").unwrap();
        assert_eq!(issue.severity, Severity::Error);
        assert!(result.issue("type-empty").is_none());
    }

    #[test]
    fn test_unparseable_header() {
        let engine = RuleEngine::default();
        let result = engine.lint("updated some stuff");
        assert!(result.issue("type-empty").is_some());
        assert!(result.issue("subject-empty").is_some());
    }

    #[test]
    fn test_invalid_scope_rejected() {
        let engine = RuleEngine::default();
        let result = engine.lint("feat(api_v2): add endpoint");
        assert!(!result.is_valid());
        assert!(result.issue("subject-empty").is_some());
    }

    #[test]
    fn test_header_max_length() {
        let engine = RuleEngine::default();
        let prefix = "feat: ";
        let header = format!("{}{}", prefix, "a".repeat(121 - prefix.len()));
        assert_eq!(header.chars().count(), 121);

        let result = engine.lint(&header);
        assert!(!result.is_valid());
        assert!(result.issue("header-max-length").is_some());

        let ok = format!("{}{}", prefix, "a".repeat(120 - prefix.len()));
        assert!(engine.lint(&ok).is_valid());
    }

    #[test]
    fn test_body_leading_blank_is_warning() {
        let engine = RuleEngine::default();
        let result = engine.lint("fix: handle timeout\nRetry once.");
        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, "body-leading-blank");
    }

    #[test]
    fn test_merge_commit_ignored() {
        let engine = RuleEngine::default();
        let result = engine.lint("Merge branch 'main' into feature/login");
        assert!(result.ignored);
        assert!(result.is_valid());
    }

    #[test]
    fn test_config_overrides() {
        let config = parse_config(
            r#"
[rules]
header-max-length = [1, "always", 20]
subject-full-stop = [0]
scope-enum = [2, "always", ["api", "cli"]]
"#,
        )
        .unwrap();
        let engine = RuleEngine::new(&config).unwrap();

        let result = engine.lint("docs(web): update the whole readme.");
        assert!(result.issue("subject-full-stop").is_none());
        assert_eq!(
            result.issue("header-max-length").map(|i| i.severity),
            Some(Severity::Warning)
        );
        assert!(result.issue("scope-enum").is_some());
        // untouched defaults still apply
        assert!(engine.lint("wip: x").issue("type-enum").is_some());
    }

    #[test]
    fn test_unknown_rule_rejected() {
        let config = parse_config("[rules]\nbody-shape = [2, \"always\"]\n").unwrap();
        assert!(RuleEngine::new(&config).is_err());
    }

    #[test]
    fn test_missing_value_rejected() {
        let config = parse_config("[rules]\nheader-max-length = [2, \"always\"]\n").unwrap();
        assert!(RuleEngine::new(&config).is_err());
    }

    #[derive(Debug)]
    struct NoTodo;

    impl Rule for NoTodo {
        fn check(&self, commit: &Commit) -> Option<ValidationIssue> {
            let subject = commit.subject.as_deref()?;
            subject.contains("TODO").then(|| ValidationIssue {
                code: self.name().to_string(),
                message: "subject mentions TODO".to_string(),
                suggestion: None,
                severity: Severity::Warning,
                line: Some(1),
            })
        }

        fn name(&self) -> &str {
            "subject-no-todo"
        }
    }

    #[test]
    fn test_custom_rule() {
        let mut engine = RuleEngine::default();
        engine.add_rule(Arc::new(NoTodo));
        let cloned = engine.clone();

        let result = cloned.lint("feat: add login TODO tests");
        assert!(result.is_valid());
        assert!(result.issue("subject-no-todo").is_some());
    }

    #[test]
    fn test_lint_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("COMMIT_EDITMSG");
        std::fs::write(&path, "fix: handle nil\n\n# comment from git\n").unwrap();

        let engine = RuleEngine::default();
        let result = engine.lint_file(&path).unwrap();
        assert!(result.is_valid());
        assert_eq!(result.message, "fix: handle nil");
        assert!(result.source.unwrap().ends_with("COMMIT_EDITMSG"));

        assert!(engine.lint_file(&dir.path().join("missing")).is_err());
    }
}
