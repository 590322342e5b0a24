//! Session settings.

use std::path::PathBuf;

/// Default data file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "students.json";

/// Settings for opening a [`Session`](super::Session).
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// JSON file loaded on open and rewritten on save.
    pub data_file: PathBuf,
    /// Save after every successful mutation.
    pub autosave: bool,
    /// Indent the JSON file.
    pub pretty_json: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            autosave: true,
            pretty_json: true,
        }
    }
}
