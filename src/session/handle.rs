use std::path::Path;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    core::store::{RecordStore, StoreError},
    persist::{PersistError, csv::export_csv, json::JsonFile},
    sort::sort_records,
    student::{StudentPatch, StudentRecord},
    types::{ErrorKind, FieldError, RollNo, SortKey, SortOrder},
};

use super::config::SessionConfig;

/// Failure of a session command.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Form text failed validation.
    #[error(transparent)]
    Field(#[from] FieldError),
    /// The store rejected the operation.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Loading, saving or exporting failed.
    #[error(transparent)]
    Persist(#[from] PersistError),
}

impl SessionError {
    /// Coarse category for presentation.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Field(err) => err.kind(),
            Self::Store(err) => err.kind(),
            Self::Persist(err) => err.kind(),
        }
    }
}

/// Single-user editing session over one data file.
///
/// Takes raw form text, validates it, applies it to the store, and saves
/// after each mutation when autosave is on. If a save fails the in-memory
/// change is kept and the error is returned.
pub struct Session {
    store: RecordStore,
    file: JsonFile,
    config: SessionConfig,
}

impl Session {
    /// Loads `config.data_file`, starting empty when it does not exist.
    pub fn open(config: SessionConfig) -> Result<Self, SessionError> {
        let file = JsonFile::new(&config.data_file).with_pretty(config.pretty_json);
        let store = file.load()?;
        Ok(Self {
            store,
            file,
            config,
        })
    }

    /// Wraps an existing store without reading the data file.
    pub fn with_store(store: RecordStore, config: SessionConfig) -> Self {
        let file = JsonFile::new(&config.data_file).with_pretty(config.pretty_json);
        Self {
            store,
            file,
            config,
        }
    }

    /// Records currently held in memory.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Settings the session was opened with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Validates form text and appends a new record.
    pub fn add(&mut self, roll: &str, name: &str, gpa: &str) -> Result<RollNo, SessionError> {
        let rec = StudentRecord::parse(roll, name, gpa)?;
        let roll = rec.roll.clone();
        self.store.add(rec)?;
        self.commit()?;
        Ok(roll)
    }

    /// Blank fields are left unchanged; an all-blank update is a no-op.
    pub fn update(
        &mut self,
        roll: &str,
        name: Option<&str>,
        gpa: Option<&str>,
    ) -> Result<(), SessionError> {
        let roll = RollNo::new(roll)?;
        let patch = StudentPatch::parse(name, gpa)?;
        if patch.is_empty() {
            self.store.lookup(&roll)?;
            warn!(%roll, "update with no fields, nothing changed");
            return Ok(());
        }
        self.store.update(&roll, patch)?;
        self.commit()
    }

    /// Removes the record with `roll` and returns it.
    pub fn delete(&mut self, roll: &str) -> Result<StudentRecord, SessionError> {
        let roll = RollNo::new(roll)?;
        let removed = self.store.delete(&roll)?;
        self.commit()?;
        Ok(removed)
    }

    /// Finds one record by roll number.
    pub fn search(&self, roll: &str) -> Result<&StudentRecord, SessionError> {
        let roll = RollNo::new(roll)?;
        Ok(self.store.lookup(&roll)?)
    }

    /// Records in insertion order, or sorted when `sort` is given.
    pub fn view(&self, sort: Option<(SortKey, SortOrder)>) -> Vec<StudentRecord> {
        match sort {
            Some((key, order)) => sort_records(&self.store, key, order),
            None => self.store.to_vec(),
        }
    }

    /// Rewrites the stored order itself, not just a view of it.
    pub fn sort_in_place(&mut self, key: SortKey, order: SortOrder) -> Result<(), SessionError> {
        self.store.reorder(key, order);
        self.commit()
    }

    /// Writes the current view to a CSV file and returns the row count.
    pub fn export_csv(
        &self,
        path: impl AsRef<Path>,
        sort: Option<(SortKey, SortOrder)>,
    ) -> Result<usize, SessionError> {
        Ok(export_csv(path, &self.view(sort))?)
    }

    /// Writes the current records to the data file.
    pub fn save(&self) -> Result<(), SessionError> {
        self.file.save(&self.store.to_vec())?;
        info!(path = %self.file.path().display(), records = self.store.len(), "saved");
        Ok(())
    }

    fn commit(&mut self) -> Result<(), SessionError> {
        let events = self.store.drain_events();
        debug!(events = events.len(), "committing store changes");
        debug_assert!(self.store.check_consistency().is_ok());
        if self.config.autosave && !events.is_empty() {
            self.save()?;
        }
        Ok(())
    }
}
