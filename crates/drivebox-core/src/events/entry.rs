//! File-entry domain events.

use serde::{Deserialize, Serialize};

use crate::types::EntryId;

/// Events related to file-entry operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EntryEvent {
    /// A batch of entries was moved to a new parent.
    Moved {
        /// The ids of every entry that was actually moved.
        entry_ids: Vec<EntryId>,
        /// The destination parent (`None` for root).
        destination: Option<EntryId>,
        /// The pre-move parent of the first moved entry.
        source: Option<EntryId>,
    },
}
