use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use rollbook::{
    session::{SessionConfig, config::DEFAULT_DATA_FILE},
    types::{SortKey, SortOrder},
};

#[derive(Debug, Parser)]
#[clap(name = "rollbook", about = "Manage student records stored in a JSON file")]
pub struct CommandLine {
    /// JSON data file.
    #[clap(long, global = true, env = "ROLLBOOK_FILE", default_value = DEFAULT_DATA_FILE)]
    pub file: PathBuf,
    /// Do not save after mutating commands.
    #[clap(long, global = true, action)]
    pub no_autosave: bool,
    /// Write the data file without indentation.
    #[clap(long, global = true, action)]
    pub compact: bool,
    #[clap(subcommand)]
    pub command: Command,
}

impl CommandLine {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            data_file: self.file.clone(),
            autosave: !self.no_autosave,
            pretty_json: !self.compact,
        }
    }
}

#[derive(Debug, Args)]
pub struct SortArgs {
    /// Sort by roll, name or gpa.
    #[clap(long)]
    pub sort: Option<SortKey>,
    /// asc or desc.
    #[clap(long, default_value = "asc")]
    pub order: SortOrder,
}

impl SortArgs {
    pub fn selection(&self) -> Option<(SortKey, SortOrder)> {
        self.sort.map(|key| (key, self.order))
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a student.
    Add {
        roll: String,
        name: String,
        gpa: String,
    },
    /// Change a student's name and/or GPA.
    Update {
        roll: String,
        #[clap(long)]
        name: Option<String>,
        #[clap(long)]
        gpa: Option<String>,
    },
    /// Remove a student.
    Delete { roll: String },
    /// Look up one student by roll number.
    Search { roll: String },
    /// Print all students.
    List {
        #[clap(flatten)]
        sort: SortArgs,
    },
    /// Sort the stored records and save that order.
    Sort {
        key: SortKey,
        #[clap(long, default_value = "asc")]
        order: SortOrder,
    },
    /// Write all students to a CSV file.
    Export {
        path: PathBuf,
        #[clap(flatten)]
        sort: SortArgs,
    },
}
