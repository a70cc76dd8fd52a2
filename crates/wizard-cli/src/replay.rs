use std::io;

use serde_json::{Map, Value};
use tracing::debug;
use wizard_engine::{StepKind, Wizard, WizardEvent, WizardState};

use crate::CliResult;

/// Drives the wizard from a `step id -> answer` map without pacing delays.
///
/// Every event is handed to `on_events` as it happens. The run stops at the
/// first answer the wizard rejects; the returned state is always complete.
pub fn replay<F>(
    wizard: &Wizard,
    answers: &Map<String, Value>,
    mut on_events: F,
) -> CliResult<WizardState>
where
    F: FnMut(&[WizardEvent]) -> io::Result<()>,
{
    let mut transition = wizard.start();
    loop {
        on_events(&transition.events)?;
        let state = transition.state;

        if let Some(ticket) = state.pending_prompt() {
            transition = wizard.deliver_prompt(state, ticket);
            continue;
        }
        if state.is_complete() {
            return Ok(state);
        }

        let step = wizard
            .current_step(&state)
            .ok_or("wizard is waiting without a current step")?;
        debug!(step = %step.id, "replaying answer");

        transition = match (&step.kind, answers.get(&step.id)) {
            (StepKind::Multi { .. }, Some(Value::Array(items))) => {
                let mut state = state;
                for item in items {
                    let option = item.as_str().ok_or_else(|| {
                        format!("answer for '{}' must be a list of strings", step.id)
                    })?;
                    if state.selection().iter().any(|selected| selected == option) {
                        continue;
                    }
                    let toggled = wizard.toggle(state, option);
                    if toggled.is_ignored() {
                        return Err(
                            format!("'{}' is not an option of '{}'", option, step.id).into()
                        );
                    }
                    state = toggled.state;
                }
                wizard.confirm_multi(state)
            }
            (StepKind::Multi { .. }, None) => wizard.confirm_multi(state),
            (StepKind::Choice { .. }, Some(Value::String(option))) => wizard.select(state, option),
            (StepKind::Choice { .. }, None) => {
                return Err(format!("missing answer for '{}'", step.id).into());
            }
            (kind, Some(Value::String(text))) if kind.is_text_like() => wizard.submit(state, text),
            (kind, None) if kind.is_text_like() => wizard.submit(state, ""),
            (_, Some(other)) => {
                return Err(format!(
                    "answer for '{}' has the wrong shape for a {} step: {}",
                    step.id,
                    step.kind.label(),
                    other
                )
                .into());
            }
            (_, None) => return Err(format!("missing answer for '{}'", step.id).into()),
        };

        if let Some(error) = transition.inline_error() {
            on_events(&transition.events)?;
            return Err(format!("{}: {}", step.id, error.message).into());
        }
        if transition.is_ignored() {
            return Err(format!("wizard ignored the answer for '{}'", step.id).into());
        }
    }
}
