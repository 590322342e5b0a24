//! Arena-backed singly linked list of student records.
//!
//! Nodes live in a `Vec` of slots and link to their successor by slot index.
//! Freed slots are recycled through a free list, so a [`NodeId`] stays valid
//! until its node is unlinked.

use crate::student::StudentRecord;

/// Stable handle to a live node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node {
    record: StudentRecord,
    next: Option<NodeId>,
}

/// Singly linked list in insertion order.
#[derive(Debug, Default)]
pub struct RecordList {
    slots: Vec<Option<Node>>,
    free: Vec<usize>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
}

impl RecordList {
    /// Empty list with no allocated slots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of linked nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when no nodes are linked.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends at the tail and returns the new node's handle.
    pub fn push_back(&mut self, record: StudentRecord) -> NodeId {
        let node = Node { record, next: None };
        let id = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(node);
                NodeId(slot)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        };

        match self.tail {
            Some(tail) => {
                if let Some(t) = self.node_mut(tail) {
                    t.next = Some(id);
                }
            }
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
        id
    }

    /// Unlinks `id`, returning its record. Remaining nodes keep their order.
    ///
    /// Walks from the head to find the predecessor.
    pub fn unlink(&mut self, id: NodeId) -> Option<StudentRecord> {
        self.node(id)?;

        let mut prev: Option<NodeId> = None;
        let mut cur = self.head;
        while let Some(c) = cur {
            if c == id {
                break;
            }
            prev = Some(c);
            cur = self.node(c).and_then(|n| n.next);
        }
        cur?;

        let node = self.slots[id.0].take()?;
        match prev {
            Some(p) => {
                if let Some(pn) = self.node_mut(p) {
                    pn.next = node.next;
                }
            }
            None => self.head = node.next,
        }
        if self.tail == Some(id) {
            self.tail = prev;
        }
        self.free.push(id.0);
        self.len -= 1;
        Some(node.record)
    }

    /// Record at `id`, or `None` once that node is unlinked.
    pub fn get(&self, id: NodeId) -> Option<&StudentRecord> {
        self.node(id).map(|n| &n.record)
    }

    /// Mutable form of [`RecordList::get`].
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut StudentRecord> {
        self.node_mut(id).map(|n| &mut n.record)
    }

    /// First node, if any.
    pub fn head(&self) -> Option<NodeId> {
        self.head
    }

    /// Last node, if any.
    pub fn tail(&self) -> Option<NodeId> {
        self.tail
    }

    /// Fresh traversal from the head.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cur: self.head,
        }
    }

    /// Traversal yielding handles alongside records.
    pub fn iter_with_ids(&self) -> impl Iterator<Item = (NodeId, &StudentRecord)> + '_ {
        let mut cur = self.head;
        std::iter::from_fn(move || {
            let id = cur?;
            let node = self.node(id)?;
            cur = node.next;
            Some((id, &node.record))
        })
    }

    /// Drops every node and releases the arena.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.0).and_then(|s| s.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots.get_mut(id.0).and_then(|s| s.as_mut())
    }
}

/// Borrowing iterator over a [`RecordList`] in link order.
pub struct Iter<'a> {
    list: &'a RecordList,
    cur: Option<NodeId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a StudentRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.cur?)?;
        self.cur = node.next;
        Some(&node.record)
    }
}
