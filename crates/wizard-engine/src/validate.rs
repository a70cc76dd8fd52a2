use std::sync::LazyLock;

use regex::Regex;

use crate::answers::{AnswerValue, ValidationCode, ValidationError};
use crate::spec::step::{StepDefinition, StepKind};

/// `<nonempty>@<nonempty>.<nonempty>`; a shape check, not RFC 5322.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".+@.+\..+").expect("email pattern compiles"));

/// Checks `value` against the step's kind rule, then its custom validator.
pub fn validate_answer(step: &StepDefinition, value: &AnswerValue) -> Result<(), ValidationError> {
    check_kind(step, value)?;

    if let Some(validator) = &step.validator {
        validator
            .check(value)
            .map_err(|message| ValidationError::new(&step.id, ValidationCode::Custom, message))?;
    }

    Ok(())
}

fn check_kind(step: &StepDefinition, value: &AnswerValue) -> Result<(), ValidationError> {
    match (&step.kind, value) {
        (StepKind::Text { min_len }, AnswerValue::Text(text)) => {
            let length = text.trim().chars().count();
            if length == 0 {
                return Err(failure(step, ValidationCode::Required, "this field is required"));
            }
            let min_len = (*min_len).max(1);
            if length < min_len {
                return Err(failure(
                    step,
                    ValidationCode::MinLength,
                    format!("enter at least {} characters", min_len),
                ));
            }
            Ok(())
        }
        (StepKind::Email, AnswerValue::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Err(failure(step, ValidationCode::Required, "this field is required"));
            }
            if !EMAIL_SHAPE.is_match(text) {
                return Err(failure(
                    step,
                    ValidationCode::EmailFormat,
                    "enter an email address",
                ));
            }
            Ok(())
        }
        (StepKind::Textarea, AnswerValue::Text(_)) => Ok(()),
        (StepKind::Choice { options }, AnswerValue::Text(text)) => {
            if options.iter().any(|option| option == text) {
                Ok(())
            } else {
                Err(failure(
                    step,
                    ValidationCode::InvalidOption,
                    "choose one of the listed options",
                ))
            }
        }
        (StepKind::Multi { options }, AnswerValue::Selection(items)) => {
            if items.is_empty() {
                return Err(failure(
                    step,
                    ValidationCode::EmptySelection,
                    "select at least one option",
                ));
            }
            if let Some(unknown) = items.iter().find(|item| !options.contains(item)) {
                return Err(failure(
                    step,
                    ValidationCode::InvalidOption,
                    format!("'{}' is not one of the listed options", unknown),
                ));
            }
            Ok(())
        }
        _ => Err(failure(step, ValidationCode::TypeMismatch, "type mismatch")),
    }
}

fn failure(step: &StepDefinition, code: ValidationCode, fallback: impl Into<String>) -> ValidationError {
    let message = step.message.clone().unwrap_or_else(|| fallback.into());
    ValidationError::new(&step.id, code, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_step() -> StepDefinition {
        StepDefinition::new("name", "Name", StepKind::Text { min_len: 2 })
    }

    #[test]
    fn text_requires_trimmed_min_length() {
        let step = name_step();
        let err = validate_answer(&step, &"  A ".into()).unwrap_err();
        assert_eq!(err.code, ValidationCode::MinLength);
        assert!(validate_answer(&step, &"Al".into()).is_ok());
    }

    #[test]
    fn text_counts_characters_not_bytes() {
        let step = name_step();
        assert!(validate_answer(&step, &"太郎".into()).is_ok());
        assert!(validate_answer(&step, &"太".into()).is_err());
    }

    #[test]
    fn blank_text_is_required() {
        let err = validate_answer(&name_step(), &"   ".into()).unwrap_err();
        assert_eq!(err.code, ValidationCode::Required);
    }

    #[test]
    fn email_needs_at_and_dot() {
        let step = StepDefinition::new("email", "Email", StepKind::Email);
        assert_eq!(
            validate_answer(&step, &"not-an-email".into())
                .unwrap_err()
                .code,
            ValidationCode::EmailFormat
        );
        assert!(validate_answer(&step, &"a@b".into()).is_err());
        assert!(validate_answer(&step, &"a@b.co".into()).is_ok());
    }

    #[test]
    fn step_message_overrides_builtin_text() {
        let step = name_step().with_message("2文字以上で入力してください。");
        let err = validate_answer(&step, &"A".into()).unwrap_err();
        assert_eq!(err.message, "2文字以上で入力してください。");
        assert_eq!(err.to_string(), err.message);
    }

    #[test]
    fn textarea_accepts_empty_text() {
        let step = StepDefinition::new("notes", "Notes", StepKind::Textarea);
        assert!(validate_answer(&step, &"".into()).is_ok());
    }

    #[test]
    fn custom_validator_runs_after_kind_rule() {
        fn no_digits(value: &AnswerValue) -> Result<(), String> {
            match value.as_text() {
                Some(text) if text.chars().any(|c| c.is_ascii_digit()) => {
                    Err("digits are not allowed".into())
                }
                _ => Ok(()),
            }
        }
        let step = StepDefinition::new("notes", "Notes", StepKind::Textarea).with_validator(no_digits);
        let err = validate_answer(&step, &"room 101".into()).unwrap_err();
        assert_eq!(err.code, ValidationCode::Custom);
        assert_eq!(err.message, "digits are not allowed");
        assert!(validate_answer(&step, &"room".into()).is_ok());
    }

    #[test]
    fn choice_rejects_undeclared_option() {
        let step = StepDefinition::new(
            "goal",
            "Goal",
            StepKind::Choice {
                options: vec!["now".into(), "later".into()],
            },
        );
        assert!(validate_answer(&step, &"now".into()).is_ok());
        assert_eq!(
            validate_answer(&step, &"never".into()).unwrap_err().code,
            ValidationCode::InvalidOption
        );
    }

    #[test]
    fn multi_rejects_empty_and_unknown_selections() {
        let step = StepDefinition::new(
            "skills",
            "Skills",
            StepKind::Multi {
                options: vec!["a".into(), "b".into()],
            },
        );
        assert_eq!(
            validate_answer(&step, &AnswerValue::Selection(vec![]))
                .unwrap_err()
                .code,
            ValidationCode::EmptySelection
        );
        assert_eq!(
            validate_answer(&step, &AnswerValue::Selection(vec!["c".into()]))
                .unwrap_err()
                .code,
            ValidationCode::InvalidOption
        );
        assert!(validate_answer(&step, &AnswerValue::Selection(vec!["b".into(), "a".into()])).is_ok());
    }

    #[test]
    fn wrong_shape_is_a_type_mismatch() {
        let err = validate_answer(&name_step(), &AnswerValue::Selection(vec!["Al".into()]))
            .unwrap_err();
        assert_eq!(err.code, ValidationCode::TypeMismatch);
    }
}
