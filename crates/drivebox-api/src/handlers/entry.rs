//! Entry handlers: lookup, children listing, and the batch move.

use axum::Json;
use axum::extract::{Path, Query, State};

use drivebox_core::error::AppError;
use drivebox_core::types::EntryId;
use drivebox_entity::entry::FileEntry;
use drivebox_service::entry::{EntryRef, MoveEntriesRequest as SvcMoveEntries};

use crate::dto::request::MoveEntriesRequest;
use crate::dto::response::{ApiResponse, MovedEntriesResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/entries/move
pub async fn move_entries(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<MoveEntriesRequest>,
) -> Result<Json<ApiResponse<MovedEntriesResponse>>, AppError> {
    let request = SvcMoveEntries {
        entries: req
            .entries
            .into_iter()
            .map(|e| EntryRef {
                id: EntryId::new(e.id),
                entry_type: e.entry_type,
            })
            .collect(),
        destination: req.destination.map(EntryId::new),
    };

    let entries = state.move_service.move_entries(&auth, request).await?;

    Ok(Json(ApiResponse::ok(MovedEntriesResponse { entries })))
}

/// GET /api/entries/{id}
pub async fn get_entry(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<FileEntry>>, AppError> {
    let entry = state
        .entry_store
        .find_by_id(EntryId::new(id))
        .await?
        .ok_or_else(|| AppError::not_found("Entry not found"))?;

    Ok(Json(ApiResponse::ok(entry)))
}

/// GET /api/entries?parent_id=...
pub async fn list_children(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<std::collections::HashMap<String, String>>,
) -> Result<Json<ApiResponse<Vec<FileEntry>>>, AppError> {
    let parent_id = match params.get("parent_id") {
        Some(raw) => Some(
            raw.parse::<EntryId>()
                .map_err(|_| AppError::validation("parent_id: must be an integer"))?,
        ),
        None => None,
    };

    let entries = state.entry_store.find_children(parent_id).await?;

    Ok(Json(ApiResponse::ok(entries)))
}
