use std::fmt;

use serde::{Deserialize, Serialize};

use crate::answers::AnswerValue;

/// Signature of a custom per-step rule. `Err` carries the user-facing message.
pub type CustomValidator = fn(&AnswerValue) -> Result<(), String>;

/// Pure validation function attached to a step on top of its kind's rule.
#[derive(Clone, Copy)]
pub struct StepValidator(pub CustomValidator);

impl StepValidator {
    pub fn check(&self, value: &AnswerValue) -> Result<(), String> {
        (self.0)(value)
    }
}

impl fmt::Debug for StepValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StepValidator(..)")
    }
}

fn default_min_len() -> usize {
    1
}

/// Closed set of step kinds. Each variant carries only the data its
/// renderer and validator need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepKind {
    /// Single-line required text with a minimum trimmed length.
    Text {
        #[serde(default = "default_min_len")]
        min_len: usize,
    },
    Email,
    /// Free multi-line text; may be empty.
    Textarea,
    Choice {
        options: Vec<String>,
    },
    Multi {
        options: Vec<String>,
    },
}

impl StepKind {
    pub fn text() -> Self {
        StepKind::Text {
            min_len: default_min_len(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StepKind::Text { .. } => "text",
            StepKind::Email => "email",
            StepKind::Textarea => "textarea",
            StepKind::Choice { .. } => "choice",
            StepKind::Multi { .. } => "multi",
        }
    }

    pub fn options(&self) -> Option<&[String]> {
        match self {
            StepKind::Choice { options } | StepKind::Multi { options } => Some(options),
            StepKind::Text { .. } | StepKind::Email | StepKind::Textarea => None,
        }
    }

    /// Text-like kinds are answered through a free-form submit.
    pub fn is_text_like(&self) -> bool {
        matches!(
            self,
            StepKind::Text { .. } | StepKind::Email | StepKind::Textarea
        )
    }
}

/// One question in the fixed sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepDefinition {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub hint: String,
    pub prompt: String,
    #[serde(flatten)]
    pub kind: StepKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Replaces the built-in failure message of the kind's rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip)]
    pub validator: Option<StepValidator>,
}

impl StepDefinition {
    pub fn new(id: impl Into<String>, title: impl Into<String>, kind: StepKind) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            hint: String::new(),
            prompt: String::new(),
            kind,
            placeholder: None,
            message: None,
            validator: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_validator(mut self, validator: CustomValidator) -> Self {
        self.validator = Some(StepValidator(validator));
        self
    }
}
