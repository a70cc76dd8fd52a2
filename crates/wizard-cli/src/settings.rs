use std::{fs, io, path::Path};

use serde_json::{Map, Value};
use tracing_subscriber::EnvFilter;
use wizard_engine::{AnswerStore, StepRegistry, WizardConfig, default_registry};

use crate::CliResult;

pub const LOG_ENV: &str = "LAUNCH_WIZARD_LOG";

/// Logs go to stderr so stdout only carries the conversation.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

pub fn load_registry(path: Option<&Path>) -> CliResult<StepRegistry> {
    match path {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .map_err(|err| format!("failed to read steps {}: {}", path.display(), err))?;
            Ok(StepRegistry::from_json(&contents)?)
        }
        None => Ok(default_registry()),
    }
}

/// File settings first, then command-line overrides.
pub fn load_config(path: Option<&Path>, pacing_ms: Option<u64>) -> CliResult<WizardConfig> {
    let mut config = match path {
        Some(path) => WizardConfig::load(path)?,
        None => WizardConfig::default(),
    };
    if let Some(pacing_ms) = pacing_ms {
        config.pacing_ms = pacing_ms;
        config.restart_delay_ms = config.restart_delay_ms.min(pacing_ms);
    }
    Ok(config)
}

/// Reads a JSON object of `step id -> answer`.
pub fn load_answer_map(path: &Path) -> CliResult<Map<String, Value>> {
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("failed to read answers {}: {}", path.display(), err))?;
    match serde_json::from_str(&contents)? {
        Value::Object(map) => Ok(map),
        other => Err(format!("answers must be a JSON object, found {}", other).into()),
    }
}

pub fn load_answer_store(path: Option<&Path>) -> CliResult<AnswerStore> {
    match path {
        Some(path) => Ok(AnswerStore::from_json(&Value::Object(load_answer_map(path)?))?),
        None => Ok(AnswerStore::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn pacing_override_caps_restart_delay() {
        let config = load_config(None, Some(0)).expect("config");
        assert_eq!(config.pacing_ms, 0);
        assert_eq!(config.restart_delay_ms, 0);

        let config = load_config(None, Some(1000)).expect("config");
        assert_eq!(config.pacing_ms, 1000);
        assert_eq!(config.restart_delay_ms, 500);
    }

    #[test]
    fn answers_must_be_an_object() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, "[1, 2]").expect("write");
        let err = load_answer_map(file.path()).unwrap_err();
        assert!(err.to_string().contains("JSON object"));
    }

    #[test]
    fn missing_steps_file_is_reported() {
        let err = load_registry(Some(Path::new("/nonexistent/steps.json"))).unwrap_err();
        assert!(err.to_string().starts_with("failed to read steps"));
    }
}
