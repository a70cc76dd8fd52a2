use serde_json::{Map, Value, json};

use crate::{
    answers::{AnswerStore, AnswerValue},
    config::WizardConfig,
    controller::WizardState,
    spec::{StepDefinition, StepKind, StepRegistry},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Text,
    Email,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Email => "email",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionToggle {
    pub label: String,
    pub selected: bool,
}

/// Input surface for the active step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
    /// Single- or multi-line input; focused as soon as it is shown.
    TextInput {
        input_type: InputType,
        multiline: bool,
        placeholder: Option<String>,
        value: Option<String>,
        autofocus: bool,
        submit_label: String,
    },
    /// One button per option; picking one commits and advances.
    QuickReplies { options: Vec<String> },
    /// Toggle buttons plus a separate confirmation action.
    MultiSelect {
        options: Vec<OptionToggle>,
        confirm_label: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarState {
    Completed,
    Active,
    Pending,
}

impl SidebarState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SidebarState::Completed => "completed",
            SidebarState::Active => "active",
            SidebarState::Pending => "pending",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntry {
    pub number: usize,
    pub step_id: String,
    pub title: String,
    pub hint: String,
    pub state: SidebarState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    /// One-based position shown in the label, capped at `total`.
    pub position: usize,
    pub total: usize,
    pub percent: f64,
}

impl Progress {
    pub fn label(&self) -> String {
        format!("{} / {}", self.position, self.total)
    }
}

/// Everything a front end needs to draw the active step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepView {
    pub index: usize,
    pub step_id: String,
    pub title: String,
    pub hint: String,
    pub prompt: String,
    pub kind: &'static str,
    pub widget: Widget,
    pub error: Option<String>,
    pub progress: Progress,
    pub sidebar: Vec<SidebarEntry>,
    pub can_go_back: bool,
}

pub fn render_progress(registry: &StepRegistry, index: usize) -> Progress {
    let total = registry.len();
    let percent = if total == 0 {
        0.0
    } else {
        (index as f64 * 100.0 / total as f64).min(100.0)
    };
    Progress {
        position: (index + 1).min(total),
        total,
        percent,
    }
}

pub fn render_sidebar(registry: &StepRegistry, index: usize) -> Vec<SidebarEntry> {
    registry
        .steps()
        .iter()
        .enumerate()
        .map(|(position, step)| SidebarEntry {
            number: position + 1,
            step_id: step.id.clone(),
            title: step.title.clone(),
            hint: step.hint.clone(),
            state: match position.cmp(&index) {
                std::cmp::Ordering::Less => SidebarState::Completed,
                std::cmp::Ordering::Equal => SidebarState::Active,
                std::cmp::Ordering::Greater => SidebarState::Pending,
            },
        })
        .collect()
}

/// Renders the live step of `state`, or `None` while no input is awaited.
pub fn render_step(
    registry: &StepRegistry,
    config: &WizardConfig,
    state: &WizardState,
) -> Option<StepView> {
    if !state.is_awaiting_input() {
        return None;
    }
    let selection = registry
        .get(state.current_step_index())
        .filter(|step| matches!(step.kind, StepKind::Multi { .. }))
        .map(|_| state.selection());
    build_step_view(
        registry,
        config,
        state.current_step_index(),
        state.answers(),
        selection,
        state.inline_error().map(|error| error.message.as_str()),
    )
}

/// Builds the view for step `index`, pre-filled from `answers`.
///
/// `selection` overrides the stored answer of a multi step with the
/// working toggle set.
pub fn build_step_view(
    registry: &StepRegistry,
    config: &WizardConfig,
    index: usize,
    answers: &AnswerStore,
    selection: Option<&[String]>,
    error: Option<&str>,
) -> Option<StepView> {
    let step = registry.get(index)?;
    let stored = answers.get(&step.id);

    Some(StepView {
        index,
        step_id: step.id.clone(),
        title: step.title.clone(),
        hint: step.hint.clone(),
        prompt: step.prompt.clone(),
        kind: step.kind.label(),
        widget: build_widget(step, stored, selection, config),
        error: error.map(str::to_string),
        progress: render_progress(registry, index),
        sidebar: render_sidebar(registry, index),
        can_go_back: index > 0,
    })
}

fn build_widget(
    step: &StepDefinition,
    stored: Option<&AnswerValue>,
    selection: Option<&[String]>,
    config: &WizardConfig,
) -> Widget {
    match &step.kind {
        StepKind::Text { .. } | StepKind::Email | StepKind::Textarea => Widget::TextInput {
            input_type: if matches!(step.kind, StepKind::Email) {
                InputType::Email
            } else {
                InputType::Text
            },
            multiline: matches!(step.kind, StepKind::Textarea),
            placeholder: step.placeholder.clone(),
            value: stored
                .and_then(AnswerValue::as_text)
                .filter(|text| !text.is_empty())
                .map(str::to_string),
            autofocus: true,
            submit_label: config.messages.submit_label.clone(),
        },
        StepKind::Choice { options } => Widget::QuickReplies {
            options: options.clone(),
        },
        StepKind::Multi { options } => {
            let selected = selection
                .or_else(|| stored.and_then(AnswerValue::as_selection))
                .unwrap_or(&[]);
            Widget::MultiSelect {
                options: options
                    .iter()
                    .map(|option| OptionToggle {
                        label: option.clone(),
                        selected: selected.contains(option),
                    })
                    .collect(),
                confirm_label: config.messages.confirm_label.clone(),
            }
        }
    }
}

/// Render the view as a structured JSON-friendly value.
pub fn render_json_ui(view: &StepView) -> Value {
    let sidebar = view
        .sidebar
        .iter()
        .map(|entry| {
            json!({
                "number": entry.number,
                "id": entry.step_id,
                "title": entry.title,
                "hint": entry.hint,
                "state": entry.state.as_str(),
            })
        })
        .collect::<Vec<_>>();

    json!({
        "index": view.index,
        "step_id": view.step_id,
        "title": view.title,
        "hint": view.hint,
        "prompt": view.prompt,
        "type": view.kind,
        "widget": widget_json(&view.widget),
        "error": view.error,
        "progress": {
            "position": view.progress.position,
            "total": view.progress.total,
            "label": view.progress.label(),
            "percent": view.progress.percent,
        },
        "sidebar": sidebar,
        "can_go_back": view.can_go_back,
    })
}

fn widget_json(widget: &Widget) -> Value {
    match widget {
        Widget::TextInput {
            input_type,
            multiline,
            placeholder,
            value,
            autofocus,
            submit_label,
        } => {
            let mut map = Map::new();
            map.insert("kind".into(), Value::String("text_input".into()));
            map.insert("input_type".into(), Value::String(input_type.as_str().into()));
            map.insert("multiline".into(), Value::Bool(*multiline));
            map.insert("autofocus".into(), Value::Bool(*autofocus));
            map.insert("submit_label".into(), Value::String(submit_label.clone()));
            if let Some(placeholder) = placeholder {
                map.insert("placeholder".into(), Value::String(placeholder.clone()));
            }
            if let Some(value) = value {
                map.insert("value".into(), Value::String(value.clone()));
            }
            Value::Object(map)
        }
        Widget::QuickReplies { options } => json!({
            "kind": "quick_replies",
            "options": options,
        }),
        Widget::MultiSelect {
            options,
            confirm_label,
        } => {
            let options = options
                .iter()
                .map(|option| {
                    json!({
                        "label": option.label,
                        "selected": option.selected,
                    })
                })
                .collect::<Vec<_>>();
            json!({
                "kind": "multi_select",
                "options": options,
                "confirm_label": confirm_label,
            })
        }
    }
}

/// Render the view as human-friendly text.
pub fn render_text(view: &StepView) -> String {
    let mut lines = Vec::new();
    let mut heading = format!("[{}] {}", view.progress.label(), view.title);
    if !view.hint.is_empty() {
        heading.push_str(&format!(" ({})", view.hint));
    }
    lines.push(heading);

    match &view.widget {
        Widget::TextInput {
            placeholder,
            value,
            multiline,
            ..
        } => {
            if let Some(placeholder) = placeholder {
                lines.push(format!("  e.g. {}", placeholder));
            }
            if let Some(value) = value {
                lines.push(format!("  Current value: {}", value));
            }
            if *multiline {
                lines.push("  (free text, may be left empty)".to_string());
            }
        }
        Widget::QuickReplies { options } => {
            for (position, option) in options.iter().enumerate() {
                lines.push(format!("  {}. {}", position + 1, option));
            }
        }
        Widget::MultiSelect {
            options,
            confirm_label,
        } => {
            for (position, option) in options.iter().enumerate() {
                let mark = if option.selected { "x" } else { " " };
                lines.push(format!("  [{}] {}. {}", mark, position + 1, option.label));
            }
            lines.push(format!("  ({}: :done)", confirm_label));
        }
    }

    if let Some(error) = &view.error {
        lines.push(format!("! {}", error));
    }

    lines.join("\n")
}

/// Sidebar listing with one marker per state.
pub fn render_sidebar_text(entries: &[SidebarEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            let marker = match entry.state {
                SidebarState::Completed => "✓",
                SidebarState::Active => ">",
                SidebarState::Pending => " ",
            };
            format!("{} {}. {}", marker, entry.number, entry.title)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
