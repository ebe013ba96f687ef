//! File-entry entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use drivebox_core::types::{EntryId, UserId};

/// Whether an entry is a file or a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum EntryType {
    /// A regular file.
    File,
    /// A folder that may contain other entries.
    Folder,
}

/// A file or folder node in the entry hierarchy.
///
/// `path` is the materialized path: the ids of every ancestor followed by
/// the entry's own id, separated by `/` (e.g. `/2/5/12`). Every
/// descendant's path is therefore prefixed by the path of every ancestor.
/// Only a move mutates `parent_id` and `path`, and only through
/// the atomic move procedure.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FileEntry {
    /// Unique entry identifier.
    pub id: EntryId,
    /// Whether this entry is a file or a folder.
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Parent entry ID (`None` for root entries).
    pub parent_id: Option<EntryId>,
    /// Display name.
    pub name: String,
    /// Full materialized path (e.g. `/2/5/12`).
    pub path: String,
    /// The entry owner.
    pub owner_id: UserId,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
    /// When the entry was last updated.
    pub updated_at: DateTime<Utc>,
}

impl FileEntry {
    /// Check if this is a root entry (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// The trailing path component identifying the entry itself,
    /// unaffected by its ancestry.
    pub fn own_segment(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Destination projection for a move: id and path only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MoveTarget {
    /// The destination entry id.
    pub id: EntryId,
    /// The destination's materialized path.
    pub path: String,
}

/// One prefix-rewrite instruction for the entry store.
///
/// The store updates the entry whose path equals `old_path` to `new_path`
/// and replaces the `old_path` prefix of every descendant path, keeping
/// the remainder unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRewrite {
    /// Path of the moved entry before the move.
    pub old_path: String,
    /// Path of the moved entry after the move.
    pub new_path: String,
}
