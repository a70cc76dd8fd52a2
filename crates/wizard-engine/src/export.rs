use std::{io, time::Duration};

use thiserror::Error;
use tracing::{info, warn};

use crate::{config::WizardConfig, summary::Summary};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export target unavailable: {0}")]
    Unavailable(String),
    #[error("export write failed: {0}")]
    Io(#[from] io::Error),
}

/// Destination for the plain-text summary (clipboard, file, stdout, ...).
pub trait SummaryExporter {
    fn export(&mut self, text: &str) -> Result<(), ExportError>;
}

/// Exports into any writer, one trailing newline.
pub struct WriterExporter<W> {
    writer: W,
}

impl<W: io::Write> WriterExporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: io::Write> SummaryExporter for WriterExporter<W> {
    fn export(&mut self, text: &str) -> Result<(), ExportError> {
        writeln!(self.writer, "{}", text)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStatus {
    Copied,
    Failed,
}

/// Transient label shown after an export attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub status: ExportStatus,
    pub label: String,
    /// Label to restore once `revert_after` has elapsed.
    pub idle_label: String,
    pub revert_after: Duration,
}

/// Runs one export attempt. Failures only change the returned label.
pub fn export_summary(
    exporter: &mut dyn SummaryExporter,
    summary: &Summary,
    config: &WizardConfig,
) -> ExportOutcome {
    let messages = &config.messages;
    let (status, label) = match exporter.export(&summary.export_text()) {
        Ok(()) => {
            info!(entries = summary.entries.len(), "summary exported");
            (ExportStatus::Copied, messages.copied_label.clone())
        }
        Err(err) => {
            warn!(error = %err, "summary export failed");
            (ExportStatus::Failed, messages.copy_failed_label.clone())
        }
    };

    ExportOutcome {
        status,
        label,
        idle_label: messages.copy_label.clone(),
        revert_after: config.export_label_delay(),
    }
}
