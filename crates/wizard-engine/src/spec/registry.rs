use std::collections::BTreeSet;

use thiserror::Error;

use crate::spec::step::StepDefinition;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("a wizard needs at least one step")]
    Empty,
    #[error("step at position {0} has an empty id")]
    EmptyId(usize),
    #[error("duplicate step id '{0}'")]
    DuplicateId(String),
    #[error("step '{0}' must declare at least one option")]
    MissingOptions(String),
    #[error("step '{step_id}' declares option '{option}' more than once")]
    DuplicateOption { step_id: String, option: String },
    #[error("failed to parse step definitions: {0}")]
    Parse(#[source] serde_json::Error),
}

/// Ordered, immutable catalog of steps.
#[derive(Debug, Clone)]
pub struct StepRegistry {
    steps: Vec<StepDefinition>,
}

impl StepRegistry {
    pub fn new(steps: Vec<StepDefinition>) -> Result<Self, RegistryError> {
        if steps.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen = BTreeSet::new();
        for (position, step) in steps.iter().enumerate() {
            if step.id.trim().is_empty() {
                return Err(RegistryError::EmptyId(position));
            }
            if !seen.insert(step.id.as_str()) {
                return Err(RegistryError::DuplicateId(step.id.clone()));
            }
            if let Some(options) = step.kind.options() {
                if options.is_empty() {
                    return Err(RegistryError::MissingOptions(step.id.clone()));
                }
                let mut labels = BTreeSet::new();
                for option in options {
                    if !labels.insert(option.as_str()) {
                        return Err(RegistryError::DuplicateOption {
                            step_id: step.id.clone(),
                            option: option.clone(),
                        });
                    }
                }
            }
        }

        Ok(Self { steps })
    }

    /// Loads a registry from a JSON array of step definitions.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let steps: Vec<StepDefinition> = serde_json::from_str(json).map_err(RegistryError::Parse)?;
        Self::new(steps)
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StepDefinition> {
        self.steps.get(index)
    }

    pub fn find(&self, id: &str) -> Option<&StepDefinition> {
        self.steps.iter().find(|step| step.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.steps.iter().position(|step| step.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::step::StepKind;

    fn step(id: &str, kind: StepKind) -> StepDefinition {
        StepDefinition::new(id, id.to_uppercase(), kind)
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = StepRegistry::new(vec![
            step("a", StepKind::Email),
            step("a", StepKind::Textarea),
        ])
        .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateId(id) if id == "a"));
    }

    #[test]
    fn rejects_choice_without_options() {
        let err = StepRegistry::new(vec![step("pick", StepKind::Choice { options: vec![] })])
            .unwrap_err();
        assert!(matches!(err, RegistryError::MissingOptions(id) if id == "pick"));
    }

    #[test]
    fn rejects_repeated_option_labels() {
        let err = StepRegistry::new(vec![step(
            "skills",
            StepKind::Multi {
                options: vec!["x".into(), "x".into()],
            },
        )])
        .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateOption { .. }));
    }

    #[test]
    fn rejects_empty_registry() {
        assert!(matches!(
            StepRegistry::new(Vec::new()),
            Err(RegistryError::Empty)
        ));
    }

    #[test]
    fn lookup_preserves_declared_order() {
        let registry = StepRegistry::new(vec![
            step("first", StepKind::text()),
            step("second", StepKind::Email),
        ])
        .expect("registry");
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(1).map(|s| s.id.as_str()), Some("second"));
        assert_eq!(registry.position("first"), Some(0));
        assert!(registry.find("third").is_none());
    }
}
