// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine for commit message validation.

pub mod builtin;
pub mod engine;
pub mod ignore;
pub mod severity;
pub mod validator;

pub use builtin::{Rule, RuleKind, TextCase};
pub use engine::RuleEngine;
pub use ignore::IgnoreMatcher;
pub use severity::{Condition, RuleSetting, RuleValue, Severity};
pub use validator::{ValidationIssue, ValidationResult};
