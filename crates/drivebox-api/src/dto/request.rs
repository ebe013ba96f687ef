//! Request DTOs.

use serde::{Deserialize, Serialize};

use drivebox_entity::entry::EntryType;

/// Move entries request body.
///
/// Field-level validation happens in the move service, after the
/// capability check; the DTO only enforces the wire shape (integer ids,
/// `type` in `{file, folder}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveEntriesRequest {
    /// Entries to move, in submitted order.
    pub entries: Vec<MoveEntryRef>,
    /// Destination entry id (`null` for the root).
    pub destination: Option<i64>,
}

/// One entry reference in a move request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveEntryRef {
    /// Entry id.
    pub id: i64,
    /// Entry type.
    #[serde(rename = "type")]
    pub entry_type: EntryType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_request_deserializes_wire_shape() {
        let req: MoveEntriesRequest = serde_json::from_str(
            r#"{"entries": [{"id": 5, "type": "folder"}], "destination": 9}"#,
        )
        .expect("deserializes");
        assert_eq!(req.entries[0].id, 5);
        assert_eq!(req.entries[0].entry_type, EntryType::Folder);
        assert_eq!(req.destination, Some(9));
    }

    #[test]
    fn test_null_destination_means_root() {
        let req: MoveEntriesRequest = serde_json::from_str(
            r#"{"entries": [{"id": 7, "type": "file"}], "destination": null}"#,
        )
        .expect("deserializes");
        assert_eq!(req.destination, None);
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let result: Result<MoveEntriesRequest, _> = serde_json::from_str(
            r#"{"entries": [{"id": 7, "type": "symlink"}], "destination": null}"#,
        );
        assert!(result.is_err());
    }
}
