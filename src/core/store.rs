//! Record store owning the linked list and its roll-number index.

use thiserror::Error;
use tracing::debug;

use crate::{
    sort::sort_records,
    student::{StudentPatch, StudentRecord},
    types::{ErrorKind, FieldError, RollNo, SortKey, SortOrder},
};

use super::{
    indices::RollIndex,
    list::{Iter, RecordList},
};

/// Failure of a store operation. The store is unchanged when one is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// A record with this roll number is already present.
    #[error("a student with roll `{0}` already exists")]
    DuplicateKey(RollNo),
    /// No record has this roll number.
    #[error("no student found with roll `{0}`")]
    NotFound(RollNo),
    /// The record or patch carried an invalid field.
    #[error(transparent)]
    InvalidFormat(#[from] FieldError),
}

impl StoreError {
    /// Coarse category for presentation.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateKey(_) => ErrorKind::DuplicateKey,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::InvalidFormat(_) => ErrorKind::InvalidFormat,
        }
    }
}

/// Completed mutation, queued until drained by the owner of the store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// A record was appended.
    Added {
        /// Roll number of the new record.
        roll: RollNo,
    },
    /// A record's name or GPA changed.
    Updated {
        /// Roll number of the changed record.
        roll: RollNo,
    },
    /// A record was unlinked.
    Deleted {
        /// Roll number of the removed record.
        roll: RollNo,
    },
    /// The whole list was rebuilt in a sorted order.
    Reordered {
        /// Key used.
        key: SortKey,
        /// Direction used.
        order: SortOrder,
    },
}

/// Index/list disagreement found by [`RecordStore::check_consistency`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    /// Index and list hold a different number of entries.
    #[error("index holds {index} entries but list holds {list}")]
    LengthMismatch {
        /// Index entry count.
        index: usize,
        /// Linked node count.
        list: usize,
    },
    /// A listed roll number has no index entry, or points elsewhere.
    #[error("roll `{0}` is not indexed to its node")]
    Unindexed(RollNo),
}

/// Authoritative student store: a linked list plus a roll-number index.
///
/// Every mutating method updates both structures before returning, so the
/// index key set always equals the set of roll numbers in the list.
#[derive(Debug, Default)]
pub struct RecordStore {
    list: RecordList,
    index: RollIndex,
    pending: Vec<StoreEvent>,
}

impl RecordStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulk-loads records in the given order.
    ///
    /// Fails on the first repeated roll number without queuing events.
    pub fn from_records<I>(records: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = StudentRecord>,
    {
        let mut store = Self::new();
        for rec in records {
            store.link(rec.normalized()?)?;
        }
        Ok(store)
    }

    /// Appends a record at the tail, storing its name trimmed.
    pub fn add(&mut self, record: StudentRecord) -> Result<(), StoreError> {
        let record = record.normalized()?;
        let roll = record.roll.clone();
        self.link(record)?;
        debug!(%roll, "student added");
        self.pending.push(StoreEvent::Added { roll });
        Ok(())
    }

    /// Unlinks the record with `roll`, returning it.
    pub fn delete(&mut self, roll: &RollNo) -> Result<StudentRecord, StoreError> {
        let id = *self
            .index
            .get(roll)
            .ok_or_else(|| StoreError::NotFound(roll.clone()))?;
        let removed = self
            .list
            .unlink(id)
            .ok_or_else(|| StoreError::NotFound(roll.clone()))?;
        self.index.remove(roll);

        debug!(%roll, "student deleted");
        self.pending.push(StoreEvent::Deleted { roll: roll.clone() });
        Ok(removed)
    }

    /// Overwrites name and/or GPA in place. The roll number never changes.
    pub fn update(&mut self, roll: &RollNo, patch: StudentPatch) -> Result<(), StoreError> {
        patch.validate()?;
        let id = *self
            .index
            .get(roll)
            .ok_or_else(|| StoreError::NotFound(roll.clone()))?;
        let rec = self
            .list
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(roll.clone()))?;
        patch.apply_to(rec);

        debug!(%roll, "student updated");
        self.pending.push(StoreEvent::Updated { roll: roll.clone() });
        Ok(())
    }

    /// Rebuilds the list in sorted order. Node handles are reassigned.
    pub fn reorder(&mut self, key: SortKey, order: SortOrder) {
        let sorted = sort_records(self.list.iter(), key, order);
        self.list.clear();
        self.index.clear();
        for rec in sorted {
            let roll = rec.roll.clone();
            let id = self.list.push_back(rec);
            self.index.insert(roll, id);
        }

        debug!(?key, ?order, "store reordered");
        self.pending.push(StoreEvent::Reordered { key, order });
    }

    /// Average O(1) lookup through the index.
    pub fn get(&self, roll: &RollNo) -> Option<&StudentRecord> {
        self.index.get(roll).and_then(|id| self.list.get(*id))
    }

    /// Like [`RecordStore::get`] but reports a missing roll as an error.
    pub fn lookup(&self, roll: &RollNo) -> Result<&StudentRecord, StoreError> {
        self.get(roll)
            .ok_or_else(|| StoreError::NotFound(roll.clone()))
    }

    /// True when `roll` is indexed.
    pub fn contains(&self, roll: &RollNo) -> bool {
        self.index.contains_key(roll)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// True when the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Lazy traversal in list order. Each call starts again from the head.
    pub fn iter(&self) -> Iter<'_> {
        self.list.iter()
    }

    /// Owned copy of every record in list order.
    pub fn to_vec(&self) -> Vec<StudentRecord> {
        self.iter().cloned().collect()
    }

    /// Indexed roll numbers, in no particular order.
    pub fn indexed_rolls(&self) -> impl Iterator<Item = &RollNo> + '_ {
        self.index.keys()
    }

    /// Takes every queued event, oldest first.
    pub fn drain_events(&mut self) -> Vec<StoreEvent> {
        std::mem::take(&mut self.pending)
    }

    /// True when mutations are waiting to be drained.
    pub fn has_pending_events(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Verifies that the index and list describe the same record set.
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        if self.index.len() != self.list.len() {
            return Err(ConsistencyError::LengthMismatch {
                index: self.index.len(),
                list: self.list.len(),
            });
        }
        for (id, rec) in self.list.iter_with_ids() {
            if self.index.get(&rec.roll) != Some(&id) {
                return Err(ConsistencyError::Unindexed(rec.roll.clone()));
            }
        }
        Ok(())
    }

    fn link(&mut self, record: StudentRecord) -> Result<(), StoreError> {
        if self.index.contains_key(&record.roll) {
            return Err(StoreError::DuplicateKey(record.roll));
        }
        let roll = record.roll.clone();
        let id = self.list.push_back(record);
        self.index.insert(roll, id);
        Ok(())
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a StudentRecord;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
