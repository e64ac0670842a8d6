use crate::export::error::ExportError;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Where a finished export is handed over, e.g. a browser download or a folder.
pub trait DownloadSink {
    fn deliver(&self, filename: &str, bytes: &[u8]) -> Result<(), ExportError>;
}

/// Writes exports as files into a directory, creating it if needed.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectorySink {
    fn deliver(&self, filename: &str, bytes: &[u8]) -> Result<(), ExportError> {
        fs::create_dir_all(&self.dir).map_err(|e| ExportError::Write(self.dir.clone(), e))?;
        let path = self.dir.join(filename);
        fs::write(&path, bytes).map_err(|e| ExportError::Write(path.clone(), e))?;
        info!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}
