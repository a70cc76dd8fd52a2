#![allow(missing_docs)]

pub mod answers;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod export;
pub mod render;
pub mod spec;
pub mod summary;
pub mod transcript;
pub mod validate;

pub use answers::{AnswerStore, AnswerValue, ValidationCode, ValidationError};
pub use catalog::{default_messages, default_registry};
pub use config::{ConfigError, Messages, WizardConfig};
pub use controller::{
    Phase, PromptTicket, StaleEvent, Transition, Wizard, WizardEvent, WizardState,
};
pub use export::{
    ExportError, ExportOutcome, ExportStatus, SummaryExporter, WriterExporter, export_summary,
};
pub use render::{
    InputType, OptionToggle, Progress, SidebarEntry, SidebarState, StepView, Widget,
    build_step_view, render_json_ui, render_progress, render_sidebar, render_sidebar_text,
    render_step, render_text,
};
pub use spec::{
    CustomValidator, RegistryError, StepDefinition, StepKind, StepRegistry, StepValidator,
};
pub use summary::{Summary, SummaryEntry, SummaryError, build_summary, render_summary_card};
pub use transcript::{Author, Transcript, TranscriptEntry};
pub use validate::validate_answer;
