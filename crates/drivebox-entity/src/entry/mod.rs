//! File-entry entity.

pub mod model;

pub use model::{EntryType, FileEntry, MoveTarget, PathRewrite};
