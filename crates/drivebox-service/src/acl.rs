//! Authorization seam for entry mutations.

use std::sync::Arc;

use async_trait::async_trait;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::types::EntryId;
use drivebox_database::repositories::entry::EntryStore;

use crate::context::RequestContext;

/// Answers "may this principal update these entry ids?".
///
/// Checked by the move executor before field-level validation; a denial is
/// surfaced as a distinct error kind from validation failure.
#[async_trait]
pub trait EntryAuthorizer: Send + Sync + 'static {
    /// Return `Ok(())` when `ctx` may update every entry in `ids`.
    async fn authorize_update(&self, ctx: &RequestContext, ids: &[EntryId]) -> AppResult<()>;
}

/// Ownership-based authorizer: admins may update anything, everyone else
/// only entries they own. Ids that resolve to no entry are left for
/// validation to reject.
pub struct OwnerAuthorizer {
    store: Arc<dyn EntryStore>,
}

impl OwnerAuthorizer {
    /// Create a new ownership-based authorizer.
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl EntryAuthorizer for OwnerAuthorizer {
    async fn authorize_update(&self, ctx: &RequestContext, ids: &[EntryId]) -> AppResult<()> {
        if ctx.is_admin() {
            return Ok(());
        }

        let entries = self.store.find_by_ids(ids).await?;
        if let Some(entry) = entries.iter().find(|e| e.owner_id != ctx.user_id) {
            return Err(AppError::authorization(format!(
                "Not permitted to update entry {}",
                entry.id
            )));
        }

        Ok(())
    }
}
