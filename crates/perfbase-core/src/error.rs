use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read capture file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse capture JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid capture structure: {0}")]
    InvalidStructure(String),

    #[error("Failed to parse {}: {source}", file.display())]
    Parse {
        file: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Attach the offending file to an error raised while loading it
    pub fn in_file(self, file: impl Into<PathBuf>) -> Self {
        match self {
            already @ Error::Parse { .. } => already,
            other => Error::Parse {
                file: file.into(),
                source: Box::new(other),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// A single capture entry that could not be normalized into a row.
///
/// Recorded on the report instead of aborting the file.
#[derive(Error, Debug, Clone, PartialEq, serde::Serialize)]
#[error("Entry #{ordinal} skipped: {reason}")]
pub struct InvalidEntry {
    pub ordinal: usize,
    pub reason: String,
}

impl InvalidEntry {
    pub fn new(ordinal: usize, reason: impl Into<String>) -> Self {
        Self {
            ordinal,
            reason: reason.into(),
        }
    }
}
