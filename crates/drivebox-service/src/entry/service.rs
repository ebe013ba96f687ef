//! Batch entry moves.
//!
//! A move repoints the parent of up to [`MAX_MOVE_BATCH`] entries at a new
//! destination folder (or the root), rewrites the materialized path of
//! every moved entry and its whole descendant subtree, and publishes a
//! single moved event for downstream listeners.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use drivebox_core::error::AppError;
use drivebox_core::events::{DomainEvent, EntryEvent, EventPayload, EventSink};
use drivebox_core::result::AppResult;
use drivebox_core::types::EntryId;
use drivebox_database::repositories::entry::EntryStore;
use drivebox_entity::entry::{EntryType, FileEntry, MoveTarget, PathRewrite};

use crate::acl::EntryAuthorizer;
use crate::context::RequestContext;

use super::guard;

/// Hard cap on entries considered per move request. Entries beyond the cap
/// are silently dropped before any other processing.
pub const MAX_MOVE_BATCH: usize = 30;

/// One element of a move request.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct EntryRef {
    /// The entry id.
    pub id: EntryId,
    /// Whether the caller believes the entry is a file or a folder.
    #[serde(rename = "type")]
    pub entry_type: EntryType,
}

/// Request to move a batch of entries to a new parent.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct MoveEntriesRequest {
    /// Entries to move, in caller-submitted order.
    pub entries: Vec<EntryRef>,
    /// Destination folder id, or `None` for the root.
    pub destination: Option<EntryId>,
}

/// Orchestrates batch entry moves.
pub struct EntryMoveService {
    /// Entry store.
    store: Arc<dyn EntryStore>,
    /// Capability check for entry updates.
    authorizer: Arc<dyn EntryAuthorizer>,
    /// Sink receiving the moved event.
    events: Arc<dyn EventSink>,
}

impl EntryMoveService {
    /// Creates a new move service.
    pub fn new(
        store: Arc<dyn EntryStore>,
        authorizer: Arc<dyn EntryAuthorizer>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            store,
            authorizer,
            events,
        }
    }

    /// Move a batch of entries to `destination`.
    ///
    /// Entries whose move would create a cycle (destination is the entry
    /// itself or one of its descendants) are dropped rather than failing
    /// the batch; if nothing survives, the request fails with the
    /// empty-batch error and no mutation or event takes place.
    ///
    /// On success returns the filtered, moved entries with their new
    /// parent and path.
    pub async fn move_entries(
        &self,
        ctx: &RequestContext,
        mut req: MoveEntriesRequest,
    ) -> AppResult<Vec<FileEntry>> {
        req.entries.truncate(MAX_MOVE_BATCH);
        let ids: Vec<EntryId> = req.entries.iter().map(|e| e.id).collect();

        // The capability check deliberately runs before field-level
        // validation, matching the established endpoint contract.
        self.authorizer.authorize_update(ctx, &ids).await?;

        if req.entries.is_empty() {
            return Err(AppError::validation(
                "entries: at least one entry is required",
            ));
        }

        let destination = match req.destination {
            Some(id) => Some(self.store.find_move_target(id).await?.ok_or_else(|| {
                AppError::validation(format!("destination: entry {id} does not exist"))
            })?),
            None => None,
        };

        let entries = self.store.find_by_ids(&ids).await?;
        let entries = order_by_request(entries, &ids);
        let mut entries = guard::remove_invalid_entries(entries, destination.as_ref());

        if entries.is_empty() {
            return Err(AppError::empty_batch("There was nothing to move"));
        }

        // Notification metadata: the pre-move parent of the first entry
        // stands in for the whole batch even when parents were mixed.
        let source = entries[0].parent_id;

        let rewrites: Vec<PathRewrite> = entries
            .iter()
            .map(|entry| PathRewrite {
                old_path: entry.path.clone(),
                new_path: joined_path(destination.as_ref(), entry.own_segment()),
            })
            .collect();

        let moved_ids: Vec<EntryId> = entries.iter().map(|e| e.id).collect();
        self.store
            .apply_move(&moved_ids, req.destination, &rewrites)
            .await?;

        let now = Utc::now();
        for (entry, rewrite) in entries.iter_mut().zip(&rewrites) {
            entry.parent_id = req.destination;
            entry.path = rewrite.new_path.clone();
            entry.updated_at = now;
        }

        self.events.publish(DomainEvent::new(
            Some(ctx.user_id),
            EventPayload::Entry(EntryEvent::Moved {
                entry_ids: moved_ids.clone(),
                destination: req.destination,
                source,
            }),
        ));

        info!(
            user_id = %ctx.user_id,
            moved = moved_ids.len(),
            destination = ?req.destination,
            "Entries moved"
        );

        Ok(entries)
    }
}

/// New path for a moved entry: the destination path (empty for root)
/// followed by the entry's own trailing segment.
fn joined_path(destination: Option<&MoveTarget>, segment: &str) -> String {
    match destination {
        Some(target) => format!("{}/{segment}", target.path),
        None => format!("/{segment}"),
    }
}

/// Reorder loaded entries to the caller-submitted id order so that "first
/// entry" is deterministic.
fn order_by_request(mut entries: Vec<FileEntry>, ids: &[EntryId]) -> Vec<FileEntry> {
    let position: HashMap<EntryId, usize> = ids
        .iter()
        .enumerate()
        .map(|(index, id)| (*id, index))
        .collect();
    entries.sort_by_key(|entry| position.get(&entry.id).copied().unwrap_or(usize::MAX));
    entries
}
