//! Unified error types for buildroot-sbom.
//!
//! Structural problems with the inputs (manifest, CPE dictionary) are fatal
//! and carry a kind sub-enum with the exact failure; content-quality problems
//! (unparseable license, unmatched CPE) never surface here; they degrade to
//! an omitted field at the model layer.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for buildroot-sbom operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SbomError {
    /// Errors while reading the Buildroot manifest
    #[error("Failed to read manifest {path:?}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: ManifestErrorKind,
    },

    /// Errors while loading the CPE dictionary
    #[error("Failed to load CPE dictionary {path:?}")]
    CpeDictionary {
        path: PathBuf,
        #[source]
        source: CpeErrorKind,
    },

    /// Errors while rendering a BOM document
    #[error("Failed to render {format} document: {message}")]
    Render {
        format: &'static str,
        message: String,
    },

    /// IO errors with path context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Specific manifest error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ManifestErrorKind {
    /// A data row does not resolve every required column. Either the header
    /// lacks the column or the row is shorter than the header.
    #[error(
        "row is missing a required column\n  expected header: {expected}\n  found row: {row}"
    )]
    MissingColumn { expected: String, row: String },

    #[error("unterminated quoted field starting on line {line}")]
    UnterminatedQuote { line: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Specific CPE dictionary error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CpeErrorKind {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("not a JSON object at the top level: {0}")]
    InvalidJson(String),
}

/// Convenient Result type for buildroot-sbom operations
pub type Result<T> = std::result::Result<T, SbomError>;

impl SbomError {
    /// Create a manifest error with path context
    pub fn manifest(path: impl Into<PathBuf>, source: ManifestErrorKind) -> Self {
        Self::Manifest {
            path: path.into(),
            source,
        }
    }

    /// Create a CPE dictionary error with path context
    pub fn cpe(path: impl Into<PathBuf>, source: CpeErrorKind) -> Self {
        Self::CpeDictionary {
            path: path.into(),
            source,
        }
    }

    /// Create a render error for the given output format
    pub fn render(format: &'static str, message: impl Into<String>) -> Self {
        Self::Render {
            format,
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let message = format!("{source}");
        Self::Io {
            path: path.into(),
            message,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_display_names_header_and_row() {
        let err = SbomError::manifest(
            "manifest.csv",
            ManifestErrorKind::MissingColumn {
                expected: "PACKAGE,VERSION".to_string(),
                row: "zlib".to_string(),
            },
        );
        let display = format!("{err}");
        assert!(display.contains("manifest.csv"), "missing path: {display}");

        let source = std::error::Error::source(&err).expect("kind is attached");
        let detail = format!("{source}");
        assert!(detail.contains("PACKAGE,VERSION"), "missing header: {detail}");
        assert!(detail.contains("zlib"), "missing row: {detail}");
    }

    #[test]
    fn test_io_error_keeps_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = SbomError::io("/tmp/out.json", io_err);
        assert!(format!("{err}").contains("/tmp/out.json"));
    }
}
