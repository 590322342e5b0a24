/// CSV export sink.
pub mod csv;
/// JSON file load and atomic save.
pub mod json;

use std::io;

use thiserror::Error;

use crate::{student::StudentRecord, types::ErrorKind};

/// Failure while reading or writing a records file.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The filesystem failed, including mid-write while serializing.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    /// The file is not valid JSON.
    #[error("malformed JSON: {0}")]
    Json(serde_json::Error),
    /// The top-level JSON value is not an array.
    #[error("expected a JSON array of student records")]
    NotArray,
    /// One array entry could not become a record.
    #[error("invalid record at index {index}: {reason}")]
    InvalidFormat {
        /// Zero-based position in the array.
        index: usize,
        /// Decode or store error for that entry.
        reason: String,
    },
}

impl PersistError {
    /// Coarse category for presentation.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) => ErrorKind::Io,
            Self::Json(_) | Self::NotArray | Self::InvalidFormat { .. } => ErrorKind::InvalidFormat,
        }
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(err: serde_json::Error) -> Self {
        // serde_json reports writer failures through its own error type.
        if err.is_io() {
            Self::Io(io::Error::from(err))
        } else {
            Self::Json(err)
        }
    }
}

impl From<tempfile::PersistError> for PersistError {
    fn from(value: tempfile::PersistError) -> Self {
        Self::Io(value.error)
    }
}

/// Result alias used across the persistence layer.
pub type PersistResult<T> = Result<T, PersistError>;

/// Destination for a full record set, written in the order given.
pub trait RecordSink {
    /// Writes every record and returns how many were written.
    fn write_records(&mut self, records: &[StudentRecord]) -> PersistResult<usize>;

    /// Pushes buffered output to the underlying writer.
    fn flush(&mut self) -> PersistResult<()> {
        Ok(())
    }
}
