use std::fs;
use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

use crate::config::DEFAULT_EXPORT_FILE;

/// Errors that can occur during export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExportError::Io {
            path: path.into(),
            source,
        }
    }
}

/// A persisted advisory ready for download.
#[derive(Debug, Clone)]
pub struct ExportedAdvisory {
    /// Where the plain-text advisory was written.
    pub path: PathBuf,
    /// Base64 encoding of the file bytes.
    pub encoded: String,
}

impl ExportedAdvisory {
    /// Data URI mirroring a browser download link for the exported file.
    pub fn download_href(&self) -> String {
        format!("data:application/octet-stream;base64,{}", self.encoded)
    }
}

/// Persists the full advisory text and produces a downloadable encoding.
pub struct ExportWriter {
    path: PathBuf,
}

impl ExportWriter {
    /// Creates a writer targeting the default export file.
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_EXPORT_FILE),
        }
    }

    /// Creates a writer targeting a specific file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Writes the full advisory text to the export file (overwriting any
    /// previous export), reads it back, and returns the base64-encoded bytes.
    ///
    /// No partial-file cleanup on failure.
    pub fn export(&self, full_text: &str) -> Result<ExportedAdvisory, ExportError> {
        fs::write(&self.path, full_text).map_err(|e| ExportError::io(&self.path, e))?;

        let bytes = fs::read(&self.path).map_err(|e| ExportError::io(&self.path, e))?;

        Ok(ExportedAdvisory {
            path: self.path.clone(),
            encoded: STANDARD.encode(bytes),
        })
    }
}

impl Default for ExportWriter {
    fn default() -> Self {
        Self::new()
    }
}
