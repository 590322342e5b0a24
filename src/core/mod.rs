//! In-memory record store, linked list and roll-number index.

/// Roll-number index alias.
pub mod indices;
/// Arena-backed singly linked list.
pub mod list;
/// Authoritative record store.
pub mod store;
