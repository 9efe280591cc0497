// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Default configuration values.

use crate::rules::{Condition, RuleKind, RuleSetting, RuleValue, Severity};

use super::schema::CommitType;

/// Maximum header length in characters.
pub const HEADER_MAX_LENGTH: usize = 120;

/// The default rule table.
pub fn default_rules() -> Vec<(RuleKind, RuleSetting)> {
    let types = CommitType::all()
        .iter()
        .map(|t| t.as_str().to_string())
        .collect();

    vec![
        (RuleKind::TypeCase, RuleSetting::off()),
        (RuleKind::ScopeCase, RuleSetting::off()),
        (RuleKind::SubjectCase, RuleSetting::off()),
        (
            RuleKind::TypeEnum,
            RuleSetting::new(Severity::Error, Condition::Always).with_value(RuleValue::List(types)),
        ),
        (
            RuleKind::TypeEmpty,
            RuleSetting::new(Severity::Error, Condition::Never),
        ),
        (
            RuleKind::SubjectEmpty,
            RuleSetting::new(Severity::Error, Condition::Never),
        ),
        (
            RuleKind::SubjectFullStop,
            RuleSetting::new(Severity::Error, Condition::Never)
                .with_value(RuleValue::Text(".".to_string())),
        ),
        (
            RuleKind::HeaderMaxLength,
            RuleSetting::new(Severity::Error, Condition::Always)
                .with_value(RuleValue::Number(HEADER_MAX_LENGTH)),
        ),
        (
            RuleKind::BodyLeadingBlank,
            RuleSetting::new(Severity::Warning, Condition::Always),
        ),
        (
            RuleKind::FooterLeadingBlank,
            RuleSetting::new(Severity::Warning, Condition::Always),
        ),
    ]
}

/// Generate an example configuration file.
pub fn example_config() -> &'static str {
    r#"# ck-lint configuration
# Author: Eshan Roy
# SPDX-License-Identifier: MIT

# Treat warnings as errors
strict = false

# Printed under failing reports
# help_url = "https://www.conventionalcommits.org"

# Rules: [severity, condition, value]
# severity: 0 = off, 1 = warning, 2 = error
# condition: "always" or "never"
[rules]
type-case = [0]
scope-case = [0]
subject-case = [0]
type-enum = [2, "always", ["feat", "fix", "docs", "style", "refactor", "perf", "test", "build", "ci", "chore", "revert"]]
type-empty = [2, "never"]
subject-empty = [2, "never"]
subject-full-stop = [2, "never", "."]
header-max-length = [2, "always", 120]
body-leading-blank = [1, "always"]
footer-leading-blank = [1, "always"]
# scope-enum = [2, "always", ["api", "cli", "core"]]
# body-max-line-length = [1, "always", 100]

# Header parser: optional emoji, type, (scope), subject.
# Type and scope are lowercased before the rules run.
[parser]
header_correspondence = ["emoji", "type", "scope", "subject"]
lowercase = ["type", "scope"]

# Messages that are not linted
[ignores]
default_ignores = true
patterns = []

[ui]
color = true
emoji = true
"#
}
