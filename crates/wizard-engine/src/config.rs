use std::{fs, io, path::Path, path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[source] serde_json::Error),
}

/// Fixed strings shown by the wizard. Defaults come from the built-in catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub greeting: String,
    /// `{title}` is replaced with the revisited step's title.
    pub revisit: String,
    pub completion: String,
    pub summary_heading: String,
    pub summary_description: String,
    pub recommendations_heading: String,
    pub recommendations: Vec<String>,
    pub export_header: String,
    pub submit_label: String,
    pub confirm_label: String,
    pub restart_label: String,
    pub copy_label: String,
    pub copied_label: String,
    pub copy_failed_label: String,
}

impl Default for Messages {
    fn default() -> Self {
        catalog::default_messages()
    }
}

impl Messages {
    pub fn revisit_for(&self, title: &str) -> String {
        self.revisit.replace("{title}", title)
    }
}

/// Runtime knobs for one wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Pause before the next prompt appears after an answer.
    pub pacing_ms: u64,
    /// Pause between the greeting and the first prompt.
    pub restart_delay_ms: u64,
    pub list_separator: String,
    pub missing_marker: String,
    /// How long the export status label stays before reverting.
    pub export_label_ms: u64,
    pub messages: Messages,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            pacing_ms: 320,
            restart_delay_ms: 500,
            list_separator: "、".into(),
            missing_marker: "未入力".into(),
            export_label_ms: 1600,
            messages: Messages::default(),
        }
    }
}

impl WizardConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::Parse)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Disables every pacing delay; used by scripted runs and tests.
    pub fn without_pacing(mut self) -> Self {
        self.pacing_ms = 0;
        self.restart_delay_ms = 0;
        self
    }

    pub fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }

    pub fn restart_delay(&self) -> Duration {
        Duration::from_millis(self.restart_delay_ms)
    }

    pub fn export_label_delay(&self) -> Duration {
        Duration::from_millis(self.export_label_ms)
    }
}
