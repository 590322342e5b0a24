//! JSON array file holding the full record set.

use std::{
    fs,
    io::{BufWriter, ErrorKind as IoErrorKind, Write},
    path::{Path, PathBuf},
};

use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::{core::store::RecordStore, student::StudentRecord};

use super::{PersistError, PersistResult, RecordSink};

/// JSON file backing a [`RecordStore`].
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
    pretty: bool,
}

impl JsonFile {
    /// Targets `path`; nothing is touched until load or save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pretty: true,
        }
    }

    /// Chooses between indented and compact output.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Target file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the file into a fresh store. A missing file yields an empty store.
    pub fn load(&self) -> PersistResult<RecordStore> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == IoErrorKind::NotFound => {
                info!(path = %self.path.display(), "no data file yet, starting empty");
                return Ok(RecordStore::new());
            }
            Err(err) => return Err(err.into()),
        };

        let store = parse_records(&text)?;
        info!(path = %self.path.display(), records = store.len(), "loaded students");
        Ok(store)
    }

    /// Atomically replaces the file with `records`.
    ///
    /// Writes a temporary file next to the target and renames it into place.
    pub fn save(&self, records: &[StudentRecord]) -> PersistResult<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        {
            let mut out = BufWriter::new(tmp.as_file_mut());
            if self.pretty {
                serde_json::to_writer_pretty(&mut out, records)?;
            } else {
                serde_json::to_writer(&mut out, records)?;
            }
            out.write_all(b"\n")?;
            out.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)?;

        debug!(path = %self.path.display(), records = records.len(), "saved students");
        Ok(())
    }
}

impl RecordSink for JsonFile {
    fn write_records(&mut self, records: &[StudentRecord]) -> PersistResult<usize> {
        self.save(records)?;
        Ok(records.len())
    }
}

/// Decodes a JSON array of records into a store, keeping file order.
pub fn parse_records(text: &str) -> PersistResult<RecordStore> {
    let Value::Array(items) = serde_json::from_str::<Value>(text)? else {
        return Err(PersistError::NotArray);
    };

    let mut store = RecordStore::new();
    for (index, item) in items.into_iter().enumerate() {
        let rec: StudentRecord =
            serde_json::from_value(item).map_err(|e| PersistError::InvalidFormat {
                index,
                reason: e.to_string(),
            })?;
        store.add(rec).map_err(|e| PersistError::InvalidFormat {
            index,
            reason: e.to_string(),
        })?;
    }
    // Loading is not a user mutation.
    store.drain_events();
    Ok(store)
}
