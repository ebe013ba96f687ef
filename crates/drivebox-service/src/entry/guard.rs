//! Cycle guard: keeps a move from making an entry its own ancestor.

use drivebox_core::types::EntryId;
use drivebox_entity::entry::{FileEntry, MoveTarget};

/// Drop every entry whose move into `destination` would create a cycle.
///
/// A destination of `None` (root) is always legal and returns the input
/// unchanged. Otherwise an entry is invalid when the destination's path
/// contains the entry's id as one of its segments, i.e. the destination is
/// the entry itself or one of its descendants. Invalid entries are removed
/// rather than failing the whole batch.
pub fn remove_invalid_entries(
    entries: Vec<FileEntry>,
    destination: Option<&MoveTarget>,
) -> Vec<FileEntry> {
    let Some(target) = destination else {
        return entries;
    };

    entries
        .into_iter()
        .filter(|entry| !path_contains_id(&target.path, entry.id))
        .collect()
}

/// Whether `id` appears as a whole segment of `path`.
///
/// Segment comparison, not substring: id `2` does not match `/25/31`.
fn path_contains_id(path: &str, id: EntryId) -> bool {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .any(|segment| segment.parse::<i64>() == Ok(id.get()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use drivebox_core::types::UserId;
    use drivebox_entity::entry::EntryType;

    fn folder(id: i64, path: &str) -> FileEntry {
        FileEntry {
            id: EntryId::new(id),
            entry_type: EntryType::Folder,
            parent_id: None,
            name: format!("folder-{id}"),
            path: path.to_string(),
            owner_id: UserId::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn target(id: i64, path: &str) -> MoveTarget {
        MoveTarget {
            id: EntryId::new(id),
            path: path.to_string(),
        }
    }

    #[test]
    fn test_root_destination_keeps_everything() {
        let entries = vec![folder(5, "/2/5"), folder(7, "/3/7")];
        let kept = remove_invalid_entries(entries, None);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_move_into_self_is_removed() {
        let kept = remove_invalid_entries(vec![folder(5, "/2/5")], Some(&target(5, "/2/5")));
        assert!(kept.is_empty());
    }

    #[test]
    fn test_move_into_descendant_is_removed() {
        let kept = remove_invalid_entries(vec![folder(5, "/2/5")], Some(&target(12, "/2/5/12")));
        assert!(kept.is_empty());
    }

    #[test]
    fn test_unrelated_destination_is_kept() {
        let kept = remove_invalid_entries(vec![folder(5, "/2/5")], Some(&target(9, "/9")));
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_id_matching_is_per_segment_not_substring() {
        // Entry 2 is not an ancestor of /25/31 even though "25" starts
        // with "2".
        assert!(!path_contains_id("/25/31", EntryId::new(2)));
        assert!(path_contains_id("/25/31", EntryId::new(25)));
        assert!(path_contains_id("/25/31", EntryId::new(31)));
    }

    #[test]
    fn test_mixed_batch_drops_only_invalid_entries() {
        let entries = vec![folder(5, "/2/5"), folder(7, "/3/7")];
        let kept = remove_invalid_entries(entries, Some(&target(12, "/2/5/12")));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, EntryId::new(7));
    }
}
