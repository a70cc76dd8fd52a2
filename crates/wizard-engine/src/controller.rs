//! The wizard state machine.
//!
//! Every transition consumes a [`WizardState`] and hands back a
//! [`Transition`]: the next state plus the events a front end should show.
//! Pacing between an answer and the next prompt is an explicit
//! [`PromptTicket`]; the host waits `ticket.delay()` and passes the ticket
//! back to [`Wizard::deliver_prompt`]. Restart and back navigation
//! invalidate any ticket still outstanding.

use std::time::Duration;

use tracing::{debug, info};

use crate::{
    answers::{AnswerStore, AnswerValue, ValidationError},
    catalog,
    config::WizardConfig,
    render::{StepView, render_step},
    spec::{StepDefinition, StepKind, StepRegistry},
    summary::{Summary, build_summary},
    transcript::Transcript,
    validate::validate_answer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The prompt for this step is scheduled but its input is not live yet.
    Pacing(usize),
    AwaitingInput(usize),
    Complete,
}

/// A deferred "show the next prompt" callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTicket {
    generation: u64,
    step_index: usize,
    delay: Duration,
}

impl PromptTicket {
    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Why an input event was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaleEvent {
    NotAwaitingInput,
    WrongStepKind {
        event: &'static str,
        kind: &'static str,
    },
    UnknownOption(String),
    AtFirstStep,
    StaleTicket,
}

#[derive(Debug, Clone)]
pub enum WizardEvent {
    BotMessage(String),
    UserMessage(String),
    RenderStep(StepView),
    InlineError(ValidationError),
    PromptScheduled(PromptTicket),
    Completed(Summary),
    Ignored(StaleEvent),
}

#[derive(Debug, Clone)]
pub struct Transition {
    pub state: WizardState,
    pub events: Vec<WizardEvent>,
}

impl Transition {
    /// A transition that changes nothing and shows nothing.
    pub fn idle(state: WizardState) -> Self {
        Self {
            state,
            events: Vec::new(),
        }
    }

    fn ignored(state: WizardState, reason: StaleEvent) -> Self {
        debug!(?reason, step = state.current_step_index, "ignoring stale event");
        Self {
            state,
            events: vec![WizardEvent::Ignored(reason)],
        }
    }

    pub fn is_ignored(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event, WizardEvent::Ignored(_)))
    }

    pub fn prompt_ticket(&self) -> Option<PromptTicket> {
        self.events.iter().find_map(|event| match event {
            WizardEvent::PromptScheduled(ticket) => Some(*ticket),
            _ => None,
        })
    }

    pub fn inline_error(&self) -> Option<&ValidationError> {
        self.events.iter().find_map(|event| match event {
            WizardEvent::InlineError(error) => Some(error),
            _ => None,
        })
    }

    pub fn summary(&self) -> Option<&Summary> {
        self.events.iter().find_map(|event| match event {
            WizardEvent::Completed(summary) => Some(summary),
            _ => None,
        })
    }

    pub fn view(&self) -> Option<&StepView> {
        self.events.iter().rev().find_map(|event| match event {
            WizardEvent::RenderStep(view) => Some(view),
            _ => None,
        })
    }

    pub fn into_parts(self) -> (WizardState, Vec<WizardEvent>) {
        (self.state, self.events)
    }
}

/// Mutable data of one run. Only [`Wizard`] transitions change it.
#[derive(Debug, Clone)]
pub struct WizardState {
    step_count: usize,
    current_step_index: usize,
    awaiting_input: bool,
    answers: AnswerStore,
    selection: Vec<String>,
    inline_error: Option<ValidationError>,
    transcript: Transcript,
    pending_prompt: Option<PromptTicket>,
    generation: u64,
}

impl WizardState {
    fn fresh(step_count: usize, generation: u64) -> Self {
        Self {
            step_count,
            current_step_index: 0,
            awaiting_input: false,
            answers: AnswerStore::new(),
            selection: Vec::new(),
            inline_error: None,
            transcript: Transcript::new(),
            pending_prompt: None,
            generation,
        }
    }

    /// In `[0, step_count]`; `step_count` is the summary state.
    pub fn current_step_index(&self) -> usize {
        self.current_step_index
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn is_awaiting_input(&self) -> bool {
        self.awaiting_input
    }

    pub fn is_complete(&self) -> bool {
        self.current_step_index >= self.step_count
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    /// Working toggle set of the active multi step, in selection order.
    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    pub fn inline_error(&self) -> Option<&ValidationError> {
        self.inline_error.as_ref()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn pending_prompt(&self) -> Option<PromptTicket> {
        self.pending_prompt
    }

    pub fn phase(&self) -> Phase {
        if self.is_complete() {
            Phase::Complete
        } else if self.awaiting_input {
            Phase::AwaitingInput(self.current_step_index)
        } else {
            Phase::Pacing(self.current_step_index)
        }
    }
}

/// Drives a [`WizardState`] through a fixed [`StepRegistry`].
#[derive(Debug, Clone)]
pub struct Wizard {
    registry: StepRegistry,
    config: WizardConfig,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new(catalog::default_registry(), WizardConfig::default())
    }
}

impl Wizard {
    pub fn new(registry: StepRegistry, config: WizardConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &StepRegistry {
        &self.registry
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    pub fn current_step<'a>(&'a self, state: &WizardState) -> Option<&'a StepDefinition> {
        self.registry.get(state.current_step_index)
    }

    pub fn render(&self, state: &WizardState) -> Option<StepView> {
        render_step(&self.registry, &self.config, state)
    }

    /// The summary for a completed run.
    pub fn summary(&self, state: &WizardState) -> Option<Summary> {
        state
            .is_complete()
            .then(|| build_summary(&self.registry, &state.answers, &self.config))
    }

    /// Begins a fresh run: greeting, then the first prompt after the restart delay.
    pub fn start(&self) -> Transition {
        self.begin(WizardState::fresh(self.registry.len(), 0))
    }

    /// Discards `state` entirely and begins again. Legal from every phase.
    pub fn restart(&self, state: WizardState) -> Transition {
        info!(
            step = state.current_step_index,
            answered = state.answers.len(),
            "restarting wizard"
        );
        self.begin(WizardState::fresh(self.registry.len(), state.generation))
    }

    fn begin(&self, mut state: WizardState) -> Transition {
        let greeting = self.config.messages.greeting.clone();
        state.transcript.push_bot(greeting.clone());
        let mut events = vec![WizardEvent::BotMessage(greeting)];
        self.schedule(&mut state, 0, self.config.restart_delay(), &mut events);
        Transition { state, events }
    }

    /// Shows the prompt a ticket was issued for, unless the ticket went stale.
    pub fn deliver_prompt(&self, mut state: WizardState, ticket: PromptTicket) -> Transition {
        if state.pending_prompt != Some(ticket) {
            return Transition::ignored(state, StaleEvent::StaleTicket);
        }
        let Some(step) = self.registry.get(ticket.step_index) else {
            return Transition::ignored(state, StaleEvent::StaleTicket);
        };
        state.pending_prompt = None;

        state.transcript.push_bot(step.prompt.clone());
        let mut events = vec![WizardEvent::BotMessage(step.prompt.clone())];
        self.enter_step(&mut state, ticket.step_index);
        events.extend(self.render(&state).map(WizardEvent::RenderStep));
        Transition { state, events }
    }

    /// Free-form answer for `text`, `email` and `textarea` steps.
    pub fn submit(&self, state: WizardState, raw: &str) -> Transition {
        let step = match self.live_step(&state) {
            Ok(step) => step,
            Err(reason) => return Transition::ignored(state, reason),
        };
        if !step.kind.is_text_like() {
            return Transition::ignored(
                state,
                StaleEvent::WrongStepKind {
                    event: "submit",
                    kind: step.kind.label(),
                },
            );
        }
        self.commit_or_reject(state, step, AnswerValue::Text(raw.trim().to_string()))
    }

    /// Picks an option of a `choice` step; commits and advances at once.
    pub fn select(&self, state: WizardState, option: &str) -> Transition {
        let step = match self.live_step(&state) {
            Ok(step) => step,
            Err(reason) => return Transition::ignored(state, reason),
        };
        if !matches!(step.kind, StepKind::Choice { .. }) {
            return Transition::ignored(
                state,
                StaleEvent::WrongStepKind {
                    event: "select",
                    kind: step.kind.label(),
                },
            );
        }
        self.commit_or_reject(state, step, AnswerValue::Text(option.to_string()))
    }

    /// Flips one option of a `multi` step in the working selection.
    pub fn toggle(&self, mut state: WizardState, option: &str) -> Transition {
        let step = match self.live_step(&state) {
            Ok(step) => step,
            Err(reason) => return Transition::ignored(state, reason),
        };
        let StepKind::Multi { options } = &step.kind else {
            return Transition::ignored(
                state,
                StaleEvent::WrongStepKind {
                    event: "toggle",
                    kind: step.kind.label(),
                },
            );
        };
        if !options.iter().any(|candidate| candidate == option) {
            return Transition::ignored(state, StaleEvent::UnknownOption(option.to_string()));
        }

        match state.selection.iter().position(|selected| selected == option) {
            Some(position) => {
                state.selection.remove(position);
            }
            None => state.selection.push(option.to_string()),
        }

        let events = self.render(&state).map(WizardEvent::RenderStep).into_iter().collect();
        Transition { state, events }
    }

    /// Validates the working selection of a `multi` step; keeps it on failure.
    pub fn confirm_multi(&self, state: WizardState) -> Transition {
        let step = match self.live_step(&state) {
            Ok(step) => step,
            Err(reason) => return Transition::ignored(state, reason),
        };
        if !matches!(step.kind, StepKind::Multi { .. }) {
            return Transition::ignored(
                state,
                StaleEvent::WrongStepKind {
                    event: "confirm",
                    kind: step.kind.label(),
                },
            );
        }
        let value = AnswerValue::Selection(state.selection.clone());
        self.commit_or_reject(state, step, value)
    }

    /// Returns to the previous step, keeping every stored answer.
    pub fn go_back(&self, mut state: WizardState) -> Transition {
        if state.current_step_index == 0 {
            return Transition::ignored(state, StaleEvent::AtFirstStep);
        }
        let index = state.current_step_index - 1;
        let Some(step) = self.registry.get(index) else {
            return Transition::ignored(state, StaleEvent::NotAwaitingInput);
        };

        state.generation += 1;
        state.pending_prompt = None;

        let message = self.config.messages.revisit_for(&step.title);
        state.transcript.push_bot(message.clone());
        let mut events = vec![WizardEvent::BotMessage(message)];
        self.enter_step(&mut state, index);
        debug!(step = %step.id, "revisiting step");
        events.extend(self.render(&state).map(WizardEvent::RenderStep));
        Transition { state, events }
    }

    fn live_step(&self, state: &WizardState) -> Result<&StepDefinition, StaleEvent> {
        if !state.awaiting_input {
            return Err(StaleEvent::NotAwaitingInput);
        }
        self.registry
            .get(state.current_step_index)
            .ok_or(StaleEvent::NotAwaitingInput)
    }

    fn commit_or_reject(
        &self,
        mut state: WizardState,
        step: &StepDefinition,
        value: AnswerValue,
    ) -> Transition {
        if let Err(error) = validate_answer(step, &value) {
            debug!(step = %step.id, code = error.code.as_str(), "answer rejected");
            state.inline_error = Some(error.clone());
            let mut events = vec![WizardEvent::InlineError(error)];
            events.extend(self.render(&state).map(WizardEvent::RenderStep));
            return Transition { state, events };
        }

        let display = value.display(&self.config.list_separator);
        state.answers.insert(step.id.clone(), value);
        state.inline_error = None;
        state.selection.clear();
        state.transcript.push_user(display.clone());
        debug!(step = %step.id, "answer committed");

        self.advance(state, vec![WizardEvent::UserMessage(display)])
    }

    fn advance(&self, mut state: WizardState, mut events: Vec<WizardEvent>) -> Transition {
        state.awaiting_input = false;
        let next = state.current_step_index + 1;
        if next < self.registry.len() {
            self.schedule(&mut state, next, self.config.pacing_delay(), &mut events);
            return Transition { state, events };
        }

        state.current_step_index = self.registry.len();
        state.pending_prompt = None;
        let completion = self.config.messages.completion.clone();
        state.transcript.push_bot(completion.clone());
        events.push(WizardEvent::BotMessage(completion));
        info!(answered = state.answers.len(), "wizard complete");
        events.push(WizardEvent::Completed(build_summary(
            &self.registry,
            &state.answers,
            &self.config,
        )));
        Transition { state, events }
    }

    fn schedule(
        &self,
        state: &mut WizardState,
        index: usize,
        delay: Duration,
        events: &mut Vec<WizardEvent>,
    ) {
        state.generation += 1;
        state.current_step_index = index;
        state.awaiting_input = false;
        let ticket = PromptTicket {
            generation: state.generation,
            step_index: index,
            delay,
        };
        state.pending_prompt = Some(ticket);
        events.push(WizardEvent::PromptScheduled(ticket));
    }

    fn enter_step(&self, state: &mut WizardState, index: usize) {
        state.current_step_index = index;
        state.awaiting_input = true;
        state.inline_error = None;
        state.selection = self
            .registry
            .get(index)
            .and_then(|step| state.answers.get(&step.id))
            .and_then(AnswerValue::as_selection)
            .map(<[String]>::to_vec)
            .unwrap_or_default();
    }
}
