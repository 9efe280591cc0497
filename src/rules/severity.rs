// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule settings: `[severity, condition, value]` tuples.
//!
//! In the configuration file a rule is written as an array, e.g.
//! `header-max-length = [2, "always", 120]`. The severity is `0` (off),
//! `1` (warning) or `2` (error). The condition defaults to `always`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How strongly a rule violation is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Off,
    Warning,
    Error,
}

impl Severity {
    /// Convert a numeric level.
    pub fn from_level(level: u64) -> Option<Self> {
        match level {
            0 => Some(Severity::Off),
            1 => Some(Severity::Warning),
            2 => Some(Severity::Error),
            _ => None,
        }
    }

    /// The numeric level.
    pub fn level(&self) -> u8 {
        match self {
            Severity::Off => 0,
            Severity::Warning => 1,
            Severity::Error => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Off => "off",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the rule's assertion must hold (`always`) or must not (`never`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    #[default]
    Always,
    Never,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Always => "always",
            Condition::Never => "never",
        }
    }

    /// Apply the condition to a raw assertion outcome.
    pub fn holds(&self, outcome: bool) -> bool {
        match self {
            Condition::Always => outcome,
            Condition::Never => !outcome,
        }
    }
}

impl std::str::FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(Condition::Always),
            "never" => Ok(Condition::Never),
            other => Err(format!("condition must be 'always' or 'never', got '{}'", other)),
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The third element of a rule setting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RuleValue {
    #[default]
    None,
    Number(usize),
    Text(String),
    List(Vec<String>),
}

impl RuleValue {
    pub fn as_number(&self) -> Option<usize> {
        match self {
            RuleValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            RuleValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The value as a list; a single string counts as a one-element list.
    pub fn as_list(&self) -> Vec<&str> {
        match self {
            RuleValue::List(items) => items.iter().map(String::as_str).collect(),
            RuleValue::Text(s) => vec![s.as_str()],
            _ => Vec::new(),
        }
    }

    fn from_json(value: &Value) -> Result<Self, String> {
        match value {
            Value::Null => Ok(RuleValue::None),
            Value::Number(n) => n
                .as_u64()
                .map(|n| RuleValue::Number(n as usize))
                .ok_or_else(|| format!("rule value must be a non-negative integer, got {}", n)),
            Value::String(s) => Ok(RuleValue::Text(s.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| format!("rule value lists must contain strings, got {}", item))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(RuleValue::List),
            other => Err(format!("unsupported rule value: {}", other)),
        }
    }

    fn to_json(&self) -> Option<Value> {
        match self {
            RuleValue::None => None,
            RuleValue::Number(n) => Some(Value::from(*n)),
            RuleValue::Text(s) => Some(Value::from(s.as_str())),
            RuleValue::List(items) => Some(Value::from(items.clone())),
        }
    }
}

/// A configured rule: severity, condition and optional value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Value>", into = "Vec<Value>")]
pub struct RuleSetting {
    pub severity: Severity,
    pub condition: Condition,
    pub value: RuleValue,
}

impl RuleSetting {
    /// Create a setting with no value.
    pub fn new(severity: Severity, condition: Condition) -> Self {
        Self {
            severity,
            condition,
            value: RuleValue::None,
        }
    }

    /// A disabled rule.
    pub fn off() -> Self {
        Self::new(Severity::Off, Condition::Always)
    }

    /// Set the value.
    pub fn with_value(mut self, value: RuleValue) -> Self {
        self.value = value;
        self
    }

    /// Whether the rule should be evaluated at all.
    pub fn is_enabled(&self) -> bool {
        self.severity != Severity::Off
    }
}

impl TryFrom<Vec<Value>> for RuleSetting {
    type Error = String;

    fn try_from(items: Vec<Value>) -> Result<Self, Self::Error> {
        if items.is_empty() || items.len() > 3 {
            return Err(format!(
                "rule setting must have 1 to 3 elements, got {}",
                items.len()
            ));
        }

        let severity = items[0]
            .as_u64()
            .and_then(Severity::from_level)
            .ok_or_else(|| format!("severity must be 0, 1 or 2, got {}", items[0]))?;

        let condition = match items.get(1) {
            Some(Value::String(s)) => s.parse()?,
            Some(other) => return Err(format!("condition must be a string, got {}", other)),
            None => Condition::Always,
        };

        let value = match items.get(2) {
            Some(v) => RuleValue::from_json(v)?,
            None => RuleValue::None,
        };

        Ok(Self {
            severity,
            condition,
            value,
        })
    }
}

impl From<RuleSetting> for Vec<Value> {
    fn from(setting: RuleSetting) -> Self {
        let mut items = vec![Value::from(setting.severity.level())];
        if setting.severity == Severity::Off && setting.value == RuleValue::None {
            return items;
        }
        items.push(Value::from(setting.condition.as_str()));
        if let Some(value) = setting.value.to_json() {
            items.push(value);
        }
        items
    }
}

impl std::fmt::Display for RuleSetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.is_enabled() {
            return f.write_str("off");
        }
        write!(f, "{}, {}", self.severity, self.condition)?;
        match &self.value {
            RuleValue::None => Ok(()),
            RuleValue::Number(n) => write!(f, ", {}", n),
            RuleValue::Text(s) => write!(f, ", \"{}\"", s),
            RuleValue::List(items) => write!(f, ", [{}]", items.join(", ")),
        }
    }
}
