use handlebars::Handlebars;
use serde::Serialize;
use thiserror::Error;

use crate::{answers::AnswerStore, config::WizardConfig, spec::StepRegistry};

const SUMMARY_CARD: &str = "\
{{heading}}
{{description}}

{{#each entries}}
- {{title}}: {{answer}}
{{/each}}

{{recommendations_heading}}
{{#each recommendations}}
  * {{this}}
{{/each}}
";

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("invalid summary template: {0}")]
    Template(#[from] handlebars::TemplateError),
    #[error("failed to render summary: {0}")]
    Render(#[from] handlebars::RenderError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryEntry {
    pub step_id: String,
    pub title: String,
    /// Display text; the missing marker when nothing was provided.
    pub answer: String,
    pub provided: bool,
}

/// Terminal report pairing every step's title with its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub heading: String,
    pub description: String,
    pub entries: Vec<SummaryEntry>,
    pub recommendations_heading: String,
    /// Fixed list; does not depend on the answers.
    pub recommendations: Vec<String>,
    pub export_header: String,
}

pub fn build_summary(registry: &StepRegistry, answers: &AnswerStore, config: &WizardConfig) -> Summary {
    let entries = registry
        .steps()
        .iter()
        .map(|step| {
            let answer = answers.get(&step.id).filter(|value| !value.is_blank());
            SummaryEntry {
                step_id: step.id.clone(),
                title: step.title.clone(),
                answer: answer
                    .map(|value| value.display(&config.list_separator))
                    .unwrap_or_else(|| config.missing_marker.clone()),
                provided: answer.is_some(),
            }
        })
        .collect();

    let messages = &config.messages;
    Summary {
        heading: messages.summary_heading.clone(),
        description: messages.summary_description.clone(),
        entries,
        recommendations_heading: messages.recommendations_heading.clone(),
        recommendations: messages.recommendations.clone(),
        export_header: messages.export_header.clone(),
    }
}

impl Summary {
    pub fn entry(&self, step_id: &str) -> Option<&SummaryEntry> {
        self.entries.iter().find(|entry| entry.step_id == step_id)
    }

    /// Plain-text export: header line, then `<title>: <answer>` per step.
    pub fn export_text(&self) -> String {
        let mut lines = Vec::with_capacity(self.entries.len() + 1);
        lines.push(self.export_header.clone());
        for entry in &self.entries {
            lines.push(format!("{}: {}", entry.title, entry.answer));
        }
        lines.join("\n")
    }
}

/// Renders the summary card shown at the end of a terminal session.
pub fn render_summary_card(summary: &Summary) -> Result<String, SummaryError> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars.register_template_string("summary", SUMMARY_CARD)?;
    Ok(handlebars.render("summary", summary)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::AnswerValue;
    use crate::spec::{StepDefinition, StepKind};
    use pretty_assertions::assert_eq;

    fn registry() -> StepRegistry {
        StepRegistry::new(vec![
            StepDefinition::new("name", "Name", StepKind::text()),
            StepDefinition::new(
                "skills",
                "Skills",
                StepKind::Multi {
                    options: vec!["ai".into(), "design".into()],
                },
            ),
            StepDefinition::new("notes", "Notes", StepKind::Textarea),
        ])
        .expect("registry")
    }

    #[test]
    fn export_lists_every_step_with_marker_for_missing() {
        let mut answers = AnswerStore::new();
        answers.insert("name", "Al".into());
        answers.insert(
            "skills",
            AnswerValue::Selection(vec!["design".into(), "ai".into()]),
        );
        answers.insert("notes", "".into());

        let summary = build_summary(&registry(), &answers, &WizardConfig::default());
        assert_eq!(
            summary.export_text(),
            "SmartLaunch Co-Founder 診断サマリー\nName: Al\nSkills: design、ai\nNotes: 未入力"
        );
        assert!(!summary.entry("notes").expect("notes").provided);
        assert_eq!(summary.recommendations.len(), 3);
    }

    #[test]
    fn card_contains_entries_and_recommendations() {
        let mut answers = AnswerStore::new();
        answers.insert("name", "<Al & Co>".into());
        let summary = build_summary(&registry(), &answers, &WizardConfig::default());
        let card = render_summary_card(&summary).expect("render");
        assert!(card.starts_with("診断サマリー"));
        assert!(card.contains("- Name: <Al & Co>"));
        assert!(card.contains("- Skills: 未入力"));
        for recommendation in &summary.recommendations {
            assert!(card.contains(recommendation.as_str()));
        }
    }
}
