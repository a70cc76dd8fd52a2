use std::{
    io::{BufRead, Write},
    thread,
};

use wizard_engine::{
    StepKind, SummaryExporter, Transition, Wizard, WizardEvent, WizardState, export_summary,
};

use crate::{CliResult, presenter::WizardPresenter};

/// One line typed into the shell.
#[derive(Debug, PartialEq, Eq)]
enum ShellInput {
    Quit,
    Back,
    Restart,
    Copy,
    History,
    Help,
    Confirm,
    Answer(String),
}

fn parse_line(line: &str) -> ShellInput {
    let trimmed = line.trim();
    match trimmed {
        ":quit" | ":q" => ShellInput::Quit,
        ":back" => ShellInput::Back,
        ":restart" => ShellInput::Restart,
        ":copy" => ShellInput::Copy,
        ":history" => ShellInput::History,
        ":help" => ShellInput::Help,
        ":done" => ShellInput::Confirm,
        _ => ShellInput::Answer(line.trim_end_matches(['\r', '\n']).to_string()),
    }
}

/// Maps `3` to the third option; anything else is taken as a label.
fn resolve_option(options: &[String], raw: &str) -> String {
    let raw = raw.trim();
    raw.parse::<usize>()
        .ok()
        .and_then(|number| number.checked_sub(1))
        .and_then(|index| options.get(index))
        .cloned()
        .unwrap_or_else(|| raw.to_string())
}

fn dispatch(wizard: &Wizard, state: WizardState, answer: &str) -> Transition {
    match wizard.current_step(&state).map(|step| &step.kind) {
        Some(StepKind::Choice { options }) => {
            wizard.select(state, &resolve_option(options, answer))
        }
        Some(StepKind::Multi { options }) => {
            if answer.trim().is_empty() {
                return wizard.confirm_multi(state);
            }
            let labels: Vec<String> = if options.iter().any(|option| option == answer.trim()) {
                vec![answer.trim().to_string()]
            } else {
                answer
                    .split([',', ' '])
                    .filter(|token| !token.is_empty())
                    .map(|token| resolve_option(options, token))
                    .collect()
            };
            let mut transition = Transition::idle(state);
            let mut events = Vec::new();
            for label in labels {
                transition = wizard.toggle(transition.state, &label);
                events.append(&mut transition.events);
            }
            // Only the latest widget matters after a batch of toggles.
            let last_view = events
                .iter()
                .rposition(|event| matches!(event, WizardEvent::RenderStep(_)));
            let mut position = 0;
            events.retain(|event| {
                let keep = !matches!(event, WizardEvent::RenderStep(_))
                    || Some(position) == last_view;
                position += 1;
                keep
            });
            Transition {
                state: transition.state,
                events,
            }
        }
        _ => wizard.submit(state, answer),
    }
}

/// Runs the chat loop until `:quit` or end of input; returns the final state.
pub fn run_shell<R: BufRead, W: Write>(
    wizard: &Wizard,
    presenter: &mut WizardPresenter<W>,
    mut input: R,
    exporter: &mut dyn SummaryExporter,
) -> CliResult<WizardState> {
    let mut transition = wizard.start();
    loop {
        let (state, events) = transition.into_parts();
        presenter.show_events(&events)?;

        if let Some(ticket) = state.pending_prompt() {
            thread::sleep(ticket.delay());
            transition = wizard.deliver_prompt(state, ticket);
            continue;
        }

        presenter.show_input_marker()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(state);
        }

        transition = match parse_line(&line) {
            ShellInput::Quit => return Ok(state),
            ShellInput::Back => wizard.go_back(state),
            ShellInput::Restart => wizard.restart(state),
            ShellInput::Confirm => wizard.confirm_multi(state),
            ShellInput::Copy => {
                match wizard.summary(&state) {
                    Some(summary) => {
                        let outcome = export_summary(exporter, &summary, wizard.config());
                        presenter.show_export(&outcome)?;
                    }
                    None => presenter
                        .show_notice("The summary can be copied once every step is answered.")?,
                }
                Transition::idle(state)
            }
            ShellInput::History => {
                presenter.show_transcript(state.transcript())?;
                Transition::idle(state)
            }
            ShellInput::Help => {
                presenter.show_help()?;
                Transition::idle(state)
            }
            ShellInput::Answer(answer) => dispatch(wizard, state, &answer),
        };
    }
}
