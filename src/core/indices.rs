//! Roll-number index into the record list.

use hashbrown::HashMap;

use crate::types::RollNo;

use super::list::NodeId;

/// Roll number to list node handle. Holds no records.
pub type RollIndex = HashMap<RollNo, NodeId>;
