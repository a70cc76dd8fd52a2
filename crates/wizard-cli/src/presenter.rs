use std::io::{self, Write};

use wizard_engine::{
    Author, ExportOutcome, ExportStatus, StepView, Summary, Transcript, WizardEvent,
    render_json_ui, render_sidebar_text, render_summary_card, render_text,
};

use crate::RenderMode;

/// Controls which bits of state the shell prints.
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum Verbosity {
    /// Clean output: chat lines and the active widget only.
    Clean,
    /// Verbose output: sidebar, pacing and validation codes too.
    Verbose,
}

impl Verbosity {
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Clean
        }
    }

    pub fn is_verbose(&self) -> bool {
        matches!(self, Verbosity::Verbose)
    }
}

/// Prints wizard events as a chat transcript.
pub struct WizardPresenter<W: Write> {
    out: W,
    verbosity: Verbosity,
    format: RenderMode,
}

impl<W: Write> WizardPresenter<W> {
    pub fn new(out: W, verbosity: Verbosity, format: RenderMode) -> Self {
        Self {
            out,
            verbosity,
            format,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn show_events(&mut self, events: &[WizardEvent]) -> io::Result<()> {
        for event in events {
            self.show_event(event)?;
        }
        Ok(())
    }

    pub fn show_event(&mut self, event: &WizardEvent) -> io::Result<()> {
        match event {
            WizardEvent::BotMessage(text) => writeln!(self.out, "bot> {}", text),
            WizardEvent::UserMessage(text) => writeln!(self.out, "you> {}", text),
            WizardEvent::RenderStep(view) => self.show_step(view),
            WizardEvent::InlineError(error) => {
                if self.verbosity.is_verbose() {
                    eprintln!("Invalid answer ({}): {}", error.code.as_str(), error.message);
                }
                Ok(())
            }
            WizardEvent::PromptScheduled(ticket) => {
                if self.verbosity.is_verbose() {
                    writeln!(
                        self.out,
                        "... next prompt in {} ms",
                        ticket.delay().as_millis()
                    )?;
                }
                Ok(())
            }
            WizardEvent::Completed(summary) => self.show_summary(summary),
            WizardEvent::Ignored(_) => Ok(()),
        }
    }

    fn show_step(&mut self, view: &StepView) -> io::Result<()> {
        match self.format {
            RenderMode::Text => {
                if self.verbosity.is_verbose() {
                    writeln!(self.out, "{}", render_sidebar_text(&view.sidebar))?;
                }
                writeln!(self.out, "{}", render_text(view))?;
                if view.can_go_back {
                    writeln!(self.out, "  (:back to revise the previous answer)")?;
                }
                Ok(())
            }
            RenderMode::Json => writeln!(self.out, "{}", render_json_ui(view)),
        }
    }

    pub fn show_summary(&mut self, summary: &Summary) -> io::Result<()> {
        match self.format {
            RenderMode::Text => match render_summary_card(summary) {
                Ok(card) => write!(self.out, "{}", card)?,
                Err(err) => {
                    eprintln!("Failed to render summary card: {}", err);
                    writeln!(self.out, "{}", summary.export_text())?;
                }
            },
            RenderMode::Json => match serde_json::to_string(summary) {
                Ok(json) => writeln!(self.out, "{}", json)?,
                Err(err) => eprintln!("Failed to serialize summary: {}", err),
            },
        }
        writeln!(self.out, "Done ✅  (:copy, :restart, :quit)")
    }

    pub fn show_export(&mut self, outcome: &ExportOutcome) -> io::Result<()> {
        match outcome.status {
            ExportStatus::Copied => writeln!(self.out, "[{}]", outcome.label),
            ExportStatus::Failed => {
                eprintln!("[{}]", outcome.label);
                Ok(())
            }
        }
    }

    pub fn show_transcript(&mut self, transcript: &Transcript) -> io::Result<()> {
        for entry in transcript.entries() {
            let author = match entry.author {
                Author::Bot => "bot",
                Author::User => "you",
            };
            writeln!(self.out, "{} {}> {}", entry.timestamp(), author, entry.text)?;
        }
        Ok(())
    }

    pub fn show_notice(&mut self, notice: &str) -> io::Result<()> {
        writeln!(self.out, "{}", notice)
    }

    pub fn show_help(&mut self) -> io::Result<()> {
        writeln!(
            self.out,
            "Commands: :back, :restart, :copy, :history, :done (confirm a multi choice), :quit"
        )
    }

    pub fn show_input_marker(&mut self) -> io::Result<()> {
        write!(self.out, "> ")?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wizard_engine::{Wizard, WizardConfig, default_registry};

    fn output(presenter: WizardPresenter<Vec<u8>>) -> String {
        String::from_utf8(presenter.into_inner()).expect("utf8")
    }

    #[test]
    fn chat_lines_are_prefixed_by_author() {
        let mut presenter = WizardPresenter::new(Vec::new(), Verbosity::Clean, RenderMode::Text);
        presenter
            .show_events(&[
                WizardEvent::BotMessage("hello".into()),
                WizardEvent::UserMessage("hi".into()),
            ])
            .expect("write");
        assert_eq!(output(presenter), "bot> hello\nyou> hi\n");
    }

    #[test]
    fn json_mode_prints_widget_structure() {
        let wizard = Wizard::new(default_registry(), WizardConfig::default().without_pacing());
        let started = wizard.start();
        let ticket = started.prompt_ticket().expect("ticket");
        let transition = wizard.deliver_prompt(started.state, ticket);

        let mut presenter = WizardPresenter::new(Vec::new(), Verbosity::Clean, RenderMode::Json);
        presenter.show_events(&transition.events).expect("write");
        let text = output(presenter);
        let json_line = text.lines().nth(1).expect("view line");
        let value: serde_json::Value = serde_json::from_str(json_line).expect("json");
        assert_eq!(value["step_id"], "name");
        assert_eq!(value["widget"]["kind"], "text_input");
    }

    #[test]
    fn transcript_lines_carry_timestamps() {
        let mut transcript = Transcript::new();
        transcript.push_bot("hello");
        let mut presenter = WizardPresenter::new(Vec::new(), Verbosity::Clean, RenderMode::Text);
        presenter.show_transcript(&transcript).expect("write");
        let text = output(presenter);
        assert!(text.ends_with(" bot> hello\n"));
        assert_eq!(text.find(' '), Some(5));
    }
}
