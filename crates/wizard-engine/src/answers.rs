use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A collected answer. Selection answers keep the order the options were picked in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    Selection(Vec<String>),
}

impl AnswerValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(text) => Some(text),
            AnswerValue::Selection(_) => None,
        }
    }

    pub fn as_selection(&self) -> Option<&[String]> {
        match self {
            AnswerValue::Selection(items) => Some(items),
            AnswerValue::Text(_) => None,
        }
    }

    /// True for empty strings and empty selections.
    pub fn is_blank(&self) -> bool {
        match self {
            AnswerValue::Text(text) => text.is_empty(),
            AnswerValue::Selection(items) => items.is_empty(),
        }
    }

    pub fn display(&self, separator: &str) -> String {
        match self {
            AnswerValue::Text(text) => text.clone(),
            AnswerValue::Selection(items) => items.join(separator),
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Text(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        AnswerValue::Text(value)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(value: Vec<String>) -> Self {
        AnswerValue::Selection(value)
    }
}

/// Answers collected during one wizard run, keyed by step id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerStore {
    entries: BTreeMap<String, AnswerValue>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, step_id: &str) -> Option<&AnswerValue> {
        self.entries.get(step_id)
    }

    pub fn contains(&self, step_id: &str) -> bool {
        self.entries.contains_key(step_id)
    }

    /// Stores `value`, returning the answer it replaced.
    pub fn insert(&mut self, step_id: impl Into<String>, value: AnswerValue) -> Option<AnswerValue> {
        self.entries.insert(step_id.into(), value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.entries.iter().map(|(id, value)| (id.as_str(), value))
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(&self.entries).unwrap_or_else(|_| Value::Object(Default::default()))
    }

    pub fn from_json(value: &Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value.clone())
    }
}

/// Machine-readable reason for a rejected answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationCode {
    Required,
    MinLength,
    EmailFormat,
    InvalidOption,
    EmptySelection,
    TypeMismatch,
    Custom,
}

impl ValidationCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationCode::Required => "required",
            ValidationCode::MinLength => "min_length",
            ValidationCode::EmailFormat => "email_format",
            ValidationCode::InvalidOption => "invalid_option",
            ValidationCode::EmptySelection => "empty_selection",
            ValidationCode::TypeMismatch => "type_mismatch",
            ValidationCode::Custom => "custom",
        }
    }
}

/// A rejected answer, scoped to one step and always recoverable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub step_id: String,
    pub code: ValidationCode,
    pub message: String,
}

impl ValidationError {
    pub fn new(step_id: impl Into<String>, code: ValidationCode, message: impl Into<String>) -> Self {
        Self {
            step_id: step_id.into(),
            code,
            message: message.into(),
        }
    }
}
