//! Student record keeping over a JSON file.
//!
//! Records live in an arena-backed singly linked list inside
//! [`core::store::RecordStore`], with a hash index for roll-number lookup
//! that is updated by the same method as every list mutation.
//!
//! # Examples
//!
//! In-memory usage with [`core::store::RecordStore`]:
//! ```
//! use rollbook::{
//!     core::store::RecordStore,
//!     sort::sort_records,
//!     student::StudentRecord,
//!     types::{RollNo, SortKey, SortOrder},
//! };
//!
//! let mut store = RecordStore::new();
//! store.add(StudentRecord::parse("2", "Grace", "3.5").expect("valid")).expect("add");
//! store.add(StudentRecord::parse("1", "Alan", "4.0").expect("valid")).expect("add");
//!
//! let roll = RollNo::new("1").expect("roll");
//! assert_eq!(store.get(&roll).map(|r| r.name.as_str()), Some("Alan"));
//!
//! let by_gpa = sort_records(&store, SortKey::Gpa, SortOrder::Descending);
//! assert_eq!(by_gpa[0].name, "Alan");
//! ```
//!
//! File-backed usage with [`session::Session`]:
//! ```no_run
//! use rollbook::session::{Session, SessionConfig};
//!
//! let mut session = Session::open(SessionConfig::default()).expect("open");
//! session.add("CS-01", "Ada", "3.9").expect("add");
//! session.export_csv("students.csv", None).expect("export");
//! ```
#![deny(missing_docs)]

/// Record store, linked list and roll-number index.
pub mod core;
/// JSON persistence and CSV export.
pub mod persist;
/// File-backed editing session used by front ends.
pub mod session;
/// Quick sort and record comparators.
pub mod sort;
/// Student record and update patch.
pub mod student;
/// Validated field types, sort selectors and error categories.
pub mod types;
