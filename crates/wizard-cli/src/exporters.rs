use std::{fs, path::PathBuf};

use wizard_engine::{ExportError, SummaryExporter};

/// Stands in for the clipboard: writes the export text to a file,
/// replacing whatever an earlier copy left there.
pub struct FileExporter {
    path: PathBuf,
}

impl FileExporter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SummaryExporter for FileExporter {
    fn export(&mut self, text: &str) -> Result<(), ExportError> {
        if self.path.is_dir() {
            return Err(ExportError::Unavailable(format!(
                "{} is a directory",
                self.path.display()
            )));
        }
        fs::write(&self.path, format!("{}\n", text))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_and_overwrites_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("summary.txt");
        let mut exporter = FileExporter::new(path.clone());
        exporter.export("first").expect("export");
        exporter.export("second").expect("export");
        assert_eq!(fs::read_to_string(&path).expect("read"), "second\n");
    }

    #[test]
    fn directory_target_is_unavailable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut exporter = FileExporter::new(dir.path().to_path_buf());
        assert!(matches!(
            exporter.export("text"),
            Err(ExportError::Unavailable(_))
        ));
    }
}
