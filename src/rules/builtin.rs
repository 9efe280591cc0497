// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in validation rules.
//!
//! Every rule computes the outcome of its assertion ("the type is one of the
//! values", "the subject ends with a full stop", ...). The configured
//! [`Condition`] then decides whether that outcome is required (`always`) or
//! forbidden (`never`).

use crate::error::{ConfigError, LintError, Result};
use crate::parser::Commit;
use lazy_static::lazy_static;
use regex::Regex;

use super::severity::{Condition, RuleSetting, RuleValue};
use super::validator::ValidationIssue;

lazy_static! {
    static ref KEBAB_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

/// Trait for custom rules.
pub trait Rule: std::fmt::Debug + Send + Sync {
    /// Check the commit and return an issue if validation fails.
    fn check(&self, commit: &Commit) -> Option<ValidationIssue>;

    /// Get the rule name.
    fn name(&self) -> &str;
}

/// The built-in rules, by configuration name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleKind {
    TypeEnum,
    TypeEmpty,
    TypeCase,
    ScopeEnum,
    ScopeEmpty,
    ScopeCase,
    SubjectEmpty,
    SubjectFullStop,
    SubjectCase,
    HeaderMaxLength,
    HeaderMinLength,
    BodyLeadingBlank,
    BodyMaxLineLength,
    FooterLeadingBlank,
    FooterMaxLineLength,
}

impl RuleKind {
    /// Get the configuration name of the rule.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::TypeEnum => "type-enum",
            RuleKind::TypeEmpty => "type-empty",
            RuleKind::TypeCase => "type-case",
            RuleKind::ScopeEnum => "scope-enum",
            RuleKind::ScopeEmpty => "scope-empty",
            RuleKind::ScopeCase => "scope-case",
            RuleKind::SubjectEmpty => "subject-empty",
            RuleKind::SubjectFullStop => "subject-full-stop",
            RuleKind::SubjectCase => "subject-case",
            RuleKind::HeaderMaxLength => "header-max-length",
            RuleKind::HeaderMinLength => "header-min-length",
            RuleKind::BodyLeadingBlank => "body-leading-blank",
            RuleKind::BodyMaxLineLength => "body-max-line-length",
            RuleKind::FooterLeadingBlank => "footer-leading-blank",
            RuleKind::FooterMaxLineLength => "footer-max-line-length",
        }
    }

    /// Get all built-in rules.
    pub fn all() -> &'static [RuleKind] {
        &[
            RuleKind::TypeEnum,
            RuleKind::TypeEmpty,
            RuleKind::TypeCase,
            RuleKind::ScopeEnum,
            RuleKind::ScopeEmpty,
            RuleKind::ScopeCase,
            RuleKind::SubjectEmpty,
            RuleKind::SubjectFullStop,
            RuleKind::SubjectCase,
            RuleKind::HeaderMaxLength,
            RuleKind::HeaderMinLength,
            RuleKind::BodyLeadingBlank,
            RuleKind::BodyMaxLineLength,
            RuleKind::FooterLeadingBlank,
            RuleKind::FooterMaxLineLength,
        ]
    }

    /// Line of the message the rule looks at.
    fn line(&self) -> usize {
        match self {
            RuleKind::BodyLeadingBlank
            | RuleKind::BodyMaxLineLength
            | RuleKind::FooterLeadingBlank
            | RuleKind::FooterMaxLineLength => 2,
            _ => 1,
        }
    }

    /// Check that a setting carries the value this rule needs.
    pub fn validate_setting(&self, setting: &RuleSetting) -> Result<()> {
        let invalid = |message: &str| {
            Err(LintError::Config(ConfigError::InvalidValue {
                key: format!("rules.{}", self.as_str()),
                message: message.to_string(),
            }))
        };

        match self {
            RuleKind::TypeEnum | RuleKind::ScopeEnum => {
                if !matches!(setting.value, RuleValue::List(_)) {
                    return invalid("expected a list of allowed values");
                }
            }
            RuleKind::HeaderMaxLength
            | RuleKind::HeaderMinLength
            | RuleKind::BodyMaxLineLength
            | RuleKind::FooterMaxLineLength => {
                if setting.value.as_number().is_none() {
                    return invalid("expected a length");
                }
            }
            RuleKind::TypeCase | RuleKind::ScopeCase | RuleKind::SubjectCase => {
                let cases = setting.value.as_list();
                if cases.is_empty() {
                    return invalid("expected a case name or a list of case names");
                }
                for case in cases {
                    if case.parse::<TextCase>().is_err() {
                        return invalid(&format!("unknown case '{}'", case));
                    }
                }
            }
            RuleKind::SubjectFullStop => {
                if !matches!(setting.value, RuleValue::None | RuleValue::Text(_)) {
                    return invalid("expected a string");
                }
            }
            RuleKind::TypeEmpty
            | RuleKind::ScopeEmpty
            | RuleKind::SubjectEmpty
            | RuleKind::BodyLeadingBlank
            | RuleKind::FooterLeadingBlank => {}
        }
        Ok(())
    }
}

impl std::str::FromStr for RuleKind {
    type Err = LintError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        RuleKind::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                LintError::Config(ConfigError::UnknownRule {
                    rule: s.to_string(),
                })
            })
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Letter case a case rule can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextCase {
    Lower,
    Upper,
    Sentence,
    Kebab,
}

impl TextCase {
    /// Check whether the text is in this case.
    pub fn matches(&self, text: &str) -> bool {
        match self {
            TextCase::Lower => text == text.to_lowercase(),
            TextCase::Upper => text == text.to_uppercase(),
            TextCase::Sentence => {
                let mut chars = text.chars();
                match chars.next() {
                    Some(first) => {
                        !first.is_lowercase() && {
                            let rest = chars.as_str();
                            rest == rest.to_lowercase()
                        }
                    }
                    None => true,
                }
            }
            TextCase::Kebab => KEBAB_REGEX.is_match(text),
        }
    }
}

impl std::str::FromStr for TextCase {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "lower-case" | "lowercase" => Ok(TextCase::Lower),
            "upper-case" | "uppercase" => Ok(TextCase::Upper),
            "sentence-case" | "sentencecase" => Ok(TextCase::Sentence),
            "kebab-case" => Ok(TextCase::Kebab),
            _ => Err(()),
        }
    }
}

/// Apply a built-in rule to a commit.
pub fn apply_builtin_rule(
    kind: RuleKind,
    setting: &RuleSetting,
    commit: &Commit,
) -> Option<ValidationIssue> {
    if !setting.is_enabled() {
        return None;
    }

    let condition = setting.condition;
    let (outcome, message, suggestion) = match kind {
        RuleKind::TypeEnum => {
            let value = commit.commit_type.as_deref()?;
            let allowed = setting.value.as_list();
            (
                allowed.contains(&value),
                format!(
                    "type '{}' must {}be one of [{}]",
                    value,
                    negation(condition),
                    allowed.join(", ")
                ),
                Some(format!("Use one of: {}", allowed.join(", "))),
            )
        }
        RuleKind::ScopeEnum => {
            let value = commit.scope.as_deref()?;
            let allowed = setting.value.as_list();
            if allowed.is_empty() {
                return None;
            }
            (
                allowed.contains(&value),
                format!(
                    "scope '{}' must {}be one of [{}]",
                    value,
                    negation(condition),
                    allowed.join(", ")
                ),
                Some(format!("Use one of: {}", allowed.join(", "))),
            )
        }
        RuleKind::TypeEmpty => (
            commit.commit_type.is_none(),
            format!("type must {}be empty", negation(condition)),
            Some("Start the header with a type, e.g. 'feat: ...'".to_string()),
        ),
        RuleKind::ScopeEmpty => (
            commit.scope.is_none(),
            format!("scope must {}be empty", negation(condition)),
            None,
        ),
        RuleKind::SubjectEmpty => (
            commit.subject.is_none(),
            format!("subject must {}be empty", negation(condition)),
            Some("Use the format: type(scope): subject".to_string()),
        ),
        RuleKind::TypeCase => case_outcome("type", commit.commit_type.as_deref()?, setting),
        RuleKind::ScopeCase => case_outcome("scope", commit.scope.as_deref()?, setting),
        RuleKind::SubjectCase => case_outcome("subject", commit.subject.as_deref()?, setting),
        RuleKind::SubjectFullStop => {
            let subject = commit.subject.as_deref()?;
            let stop = setting.value.as_text().unwrap_or(".");
            (
                subject.ends_with(stop),
                format!("subject must {}end with '{}'", negation(condition), stop),
                match condition {
                    Condition::Never => Some(format!("Remove the trailing '{}'", stop)),
                    Condition::Always => Some(format!("End the subject with '{}'", stop)),
                },
            )
        }
        RuleKind::HeaderMaxLength => {
            let max = setting.value.as_number()?;
            let len = commit.header.chars().count();
            (
                len <= max,
                format!(
                    "header must {}be at most {} characters, current length is {}",
                    negation(condition),
                    max,
                    len
                ),
                Some(format!("Shorten the header to {} characters or less", max)),
            )
        }
        RuleKind::HeaderMinLength => {
            let min = setting.value.as_number()?;
            let len = commit.header.chars().count();
            (
                len >= min,
                format!(
                    "header must {}be at least {} characters, current length is {}",
                    negation(condition),
                    min,
                    len
                ),
                Some("Add more detail to the header".to_string()),
            )
        }
        RuleKind::BodyLeadingBlank => {
            commit.body.as_ref()?;
            (
                is_blank(commit.line_after_header()),
                format!("body must {}have a leading blank line", negation(condition)),
                Some("Separate the header and the body with an empty line".to_string()),
            )
        }
        RuleKind::FooterLeadingBlank => {
            commit.footer.as_ref()?;
            (
                is_blank(commit.line_before_footer()),
                format!("footer must {}have a leading blank line", negation(condition)),
                Some("Separate the footer from the text above with an empty line".to_string()),
            )
        }
        RuleKind::BodyMaxLineLength => {
            let max = setting.value.as_number()?;
            line_length_outcome("body", commit.body.as_deref()?, max, condition)
        }
        RuleKind::FooterMaxLineLength => {
            let max = setting.value.as_number()?;
            line_length_outcome("footer", commit.footer.as_deref()?, max, condition)
        }
    };

    if condition.holds(outcome) {
        return None;
    }

    Some(ValidationIssue {
        code: kind.as_str().to_string(),
        message,
        suggestion,
        severity: setting.severity,
        line: Some(kind.line()),
    })
}

fn negation(condition: Condition) -> &'static str {
    match condition {
        Condition::Always => "",
        Condition::Never => "not ",
    }
}

fn is_blank(line: Option<&str>) -> bool {
    line.map(|l| l.trim().is_empty()).unwrap_or(true)
}

fn case_outcome(
    field: &str,
    value: &str,
    setting: &RuleSetting,
) -> (bool, String, Option<String>) {
    let names = setting.value.as_list();
    let matched = names
        .iter()
        .filter_map(|name| name.parse::<TextCase>().ok())
        .any(|case| case.matches(value));
    (
        matched,
        format!(
            "{} must {}be {}",
            field,
            negation(setting.condition),
            names.join(" or ")
        ),
        None,
    )
}

fn line_length_outcome(
    section: &str,
    text: &str,
    max: usize,
    condition: Condition,
) -> (bool, String, Option<String>) {
    let longest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    (
        longest <= max,
        format!(
            "{} lines must {}be at most {} characters, longest is {}",
            section,
            negation(condition),
            max,
            longest
        ),
        Some(format!("Wrap {} lines at {} characters", section, max)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::HeaderParser;
    use crate::rules::severity::Severity;

    fn commit(message: &str) -> Commit {
        Commit::parse(message, &HeaderParser::default())
    }

    fn error(condition: Condition) -> RuleSetting {
        RuleSetting::new(Severity::Error, condition)
    }

    fn types() -> RuleValue {
        RuleValue::List(vec!["feat".to_string(), "fix".to_string()])
    }

    #[test]
    fn test_type_enum() {
        let setting = error(Condition::Always).with_value(types());
        assert!(apply_builtin_rule(RuleKind::TypeEnum, &setting, &commit("feat: add")).is_none());

        let issue = apply_builtin_rule(RuleKind::TypeEnum, &setting, &commit("wip: add")).unwrap();
        assert_eq!(issue.code, "type-enum");
        assert!(issue.is_error());
        assert!(issue.message.contains("wip"));
    }

    #[test]
    fn test_type_enum_skips_empty_type() {
        let setting = error(Condition::Always).with_value(types());
        assert!(apply_builtin_rule(RuleKind::TypeEnum, &setting, &commit("no type here")).is_none());
    }

    #[test]
    fn test_type_empty() {
        let setting = error(Condition::Never);
        assert!(apply_builtin_rule(RuleKind::TypeEmpty, &setting, &commit("no type here")).is_some());
        assert!(apply_builtin_rule(RuleKind::TypeEmpty, &setting, &commit("fix: x")).is_none());
    }

    #[test]
    fn test_subject_full_stop() {
        let setting = error(Condition::Never).with_value(RuleValue::Text(".".to_string()));
        let issue =
            apply_builtin_rule(RuleKind::SubjectFullStop, &setting, &commit("docs: update readme."))
                .unwrap();
        assert_eq!(issue.code, "subject-full-stop");
        assert!(
            apply_builtin_rule(RuleKind::SubjectFullStop, &setting, &commit("docs: update readme"))
                .is_none()
        );
    }

    #[test]
    fn test_header_max_length_counts_chars() {
        let setting = error(Condition::Always).with_value(RuleValue::Number(10));
        // 10 chars, 14 bytes
        assert!(apply_builtin_rule(RuleKind::HeaderMaxLength, &setting, &commit("✨ feat: éé")).is_none());
        assert!(
            apply_builtin_rule(RuleKind::HeaderMaxLength, &setting, &commit("✨ feat: ééé")).is_some()
        );
    }

    #[test]
    fn test_header_max_length_on_unmatched_header() {
        let setting = error(Condition::Always).with_value(RuleValue::Number(10));
        assert!(apply_builtin_rule(RuleKind::HeaderMaxLength, &setting, &commit(&"x".repeat(11))).is_some());
    }

    #[test]
    fn test_body_leading_blank() {
        let setting = RuleSetting::new(Severity::Warning, Condition::Always);
        let issue = apply_builtin_rule(
            RuleKind::BodyLeadingBlank,
            &setting,
            &commit("fix: x\nbody right below"),
        )
        .unwrap();
        assert!(!issue.is_error());
        assert!(apply_builtin_rule(
            RuleKind::BodyLeadingBlank,
            &setting,
            &commit("fix: x\n\nbody after blank")
        )
        .is_none());
        assert!(apply_builtin_rule(RuleKind::BodyLeadingBlank, &setting, &commit("fix: x")).is_none());
    }

    #[test]
    fn test_footer_leading_blank() {
        let setting = RuleSetting::new(Severity::Warning, Condition::Always);
        assert!(apply_builtin_rule(
            RuleKind::FooterLeadingBlank,
            &setting,
            &commit("fix: x\nCloses #1")
        )
        .is_some());
        assert!(apply_builtin_rule(
            RuleKind::FooterLeadingBlank,
            &setting,
            &commit("fix: x\n\nbody\n\nCloses #1")
        )
        .is_none());
    }

    #[test]
    fn test_case_rules() {
        let setting = error(Condition::Always).with_value(RuleValue::Text("lower-case".to_string()));
        assert!(apply_builtin_rule(RuleKind::SubjectCase, &setting, &commit("fix: all lower")).is_none());
        assert!(apply_builtin_rule(RuleKind::SubjectCase, &setting, &commit("fix: Not lower")).is_some());

        let never_upper =
            error(Condition::Never).with_value(RuleValue::List(vec!["upper-case".to_string()]));
        assert!(apply_builtin_rule(RuleKind::SubjectCase, &never_upper, &commit("fix: SHOUT")).is_some());
    }

    #[test]
    fn test_text_case() {
        assert!(TextCase::Sentence.matches("Add login"));
        assert!(!TextCase::Sentence.matches("add login"));
        assert!(TextCase::Kebab.matches("api-v2"));
        assert!(!TextCase::Kebab.matches("api_v2"));
        assert!(TextCase::Upper.matches("API"));
    }

    #[test]
    fn test_scope_enum() {
        let setting = error(Condition::Always)
            .with_value(RuleValue::List(vec!["api".to_string(), "cli".to_string()]));
        assert!(apply_builtin_rule(RuleKind::ScopeEnum, &setting, &commit("feat(API): x")).is_none());
        assert!(apply_builtin_rule(RuleKind::ScopeEnum, &setting, &commit("feat(web): x")).is_some());
        assert!(apply_builtin_rule(RuleKind::ScopeEnum, &setting, &commit("feat: x")).is_none());
    }

    #[test]
    fn test_body_max_line_length() {
        let setting = error(Condition::Always).with_value(RuleValue::Number(10));
        assert!(apply_builtin_rule(
            RuleKind::BodyMaxLineLength,
            &setting,
            &commit("fix: x\n\nshort\nthis line is too long")
        )
        .is_some());
    }

    #[test]
    fn test_disabled_rule() {
        let commit = commit("wip: x");
        assert!(apply_builtin_rule(RuleKind::TypeEnum, &RuleSetting::off(), &commit).is_none());
    }

    #[test]
    fn test_rule_kind_names() {
        for kind in RuleKind::all() {
            assert_eq!(kind.as_str().parse::<RuleKind>().unwrap(), *kind);
        }
        assert!("body-shape".parse::<RuleKind>().is_err());
    }

    #[test]
    fn test_validate_setting() {
        let no_len = error(Condition::Always);
        assert!(RuleKind::HeaderMaxLength.validate_setting(&no_len).is_err());
        let bad_case = error(Condition::Always).with_value(RuleValue::Text("camel-case".to_string()));
        assert!(RuleKind::TypeCase.validate_setting(&bad_case).is_err());
        assert!(RuleKind::SubjectFullStop.validate_setting(&no_len).is_ok());
    }
}
