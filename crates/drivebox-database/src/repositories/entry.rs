//! Entry repository: id-based lookup, prefix-aware path rewriting, and the
//! atomic move write path.

use async_trait::async_trait;
use sqlx::PgPool;

use drivebox_core::error::{AppError, ErrorKind};
use drivebox_core::result::AppResult;
use drivebox_core::types::EntryId;
use drivebox_entity::entry::{FileEntry, MoveTarget, PathRewrite};

/// Narrow store interface consumed by the move executor.
///
/// Passed explicitly into services as a trait object; tests substitute an
/// in-memory implementation.
#[async_trait]
pub trait EntryStore: Send + Sync + 'static {
    /// Find an entry by ID.
    async fn find_by_id(&self, id: EntryId) -> AppResult<Option<FileEntry>>;

    /// Find every entry whose id is in `ids`. Missing ids are silently
    /// absent from the result.
    async fn find_by_ids(&self, ids: &[EntryId]) -> AppResult<Vec<FileEntry>>;

    /// List the direct children of a parent (`None` lists root entries).
    async fn find_children(&self, parent_id: Option<EntryId>) -> AppResult<Vec<FileEntry>>;

    /// Load the id + path projection of a move destination.
    async fn find_move_target(&self, id: EntryId) -> AppResult<Option<MoveTarget>>;

    /// Persist a move as one atomic unit: repoint `parent_id` for every id
    /// in `ids`, then apply each path rewrite to the moved entry and its
    /// whole descendant subtree.
    ///
    /// A rewrite with zero matching descendants is a no-op, not an error.
    async fn apply_move(
        &self,
        ids: &[EntryId],
        destination: Option<EntryId>,
        rewrites: &[PathRewrite],
    ) -> AppResult<()>;
}

/// PostgreSQL-backed entry store.
#[derive(Debug, Clone)]
pub struct PgEntryRepository {
    pool: PgPool,
}

impl PgEntryRepository {
    /// Create a new entry repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntryStore for PgEntryRepository {
    async fn find_by_id(&self, id: EntryId) -> AppResult<Option<FileEntry>> {
        sqlx::query_as::<_, FileEntry>("SELECT * FROM file_entries WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find entry", e))
    }

    async fn find_by_ids(&self, ids: &[EntryId]) -> AppResult<Vec<FileEntry>> {
        let raw_ids: Vec<i64> = ids.iter().map(|id| id.get()).collect();

        sqlx::query_as::<_, FileEntry>("SELECT * FROM file_entries WHERE id = ANY($1)")
            .bind(&raw_ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find entries", e))
    }

    async fn find_children(&self, parent_id: Option<EntryId>) -> AppResult<Vec<FileEntry>> {
        let query = match parent_id {
            Some(parent) => sqlx::query_as::<_, FileEntry>(
                "SELECT * FROM file_entries WHERE parent_id = $1 ORDER BY name ASC",
            )
            .bind(parent),
            None => sqlx::query_as::<_, FileEntry>(
                "SELECT * FROM file_entries WHERE parent_id IS NULL ORDER BY name ASC",
            ),
        };

        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list children", e))
    }

    async fn find_move_target(&self, id: EntryId) -> AppResult<Option<MoveTarget>> {
        sqlx::query_as::<_, MoveTarget>("SELECT id, path FROM file_entries WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to load move target", e)
            })
    }

    async fn apply_move(
        &self,
        ids: &[EntryId],
        destination: Option<EntryId>,
        rewrites: &[PathRewrite],
    ) -> AppResult<()> {
        let raw_ids: Vec<i64> = ids.iter().map(|id| id.get()).collect();

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin move transaction", e)
        })?;

        // Lock the moved rows and every affected subtree before mutating,
        // so concurrent moves touching the same subtree serialize here
        // instead of interleaving parent-pointer and path writes.
        sqlx::query("SELECT id FROM file_entries WHERE id = ANY($1) FOR UPDATE")
            .bind(&raw_ids)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to lock moved entries", e)
            })?;

        for rewrite in rewrites {
            sqlx::query(
                "SELECT id FROM file_entries WHERE path = $1 OR path LIKE $1 || '/%' FOR UPDATE",
            )
            .bind(&rewrite.old_path)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to lock entry subtree", e)
            })?;
        }

        sqlx::query("UPDATE file_entries SET parent_id = $1, updated_at = NOW() WHERE id = ANY($2)")
            .bind(destination.map(EntryId::get))
            .bind(&raw_ids)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update parent pointers", e)
            })?;

        for rewrite in rewrites {
            sqlx::query(
                "UPDATE file_entries \
                 SET path = $2 || substr(path, char_length($1) + 1), updated_at = NOW() \
                 WHERE path = $1 OR path LIKE $1 || '/%'",
            )
            .bind(&rewrite.old_path)
            .bind(&rewrite.new_path)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to rewrite entry paths", e)
            })?;
        }

        // A failed commit leaves the caller unsure whether anything was
        // persisted; surface it as retryable so the whole request is
        // re-submitted rather than patched incrementally.
        tx.commit().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::PartialWrite,
                "Move transaction could not be committed; retry the whole request",
                e,
            )
        })
    }
}
