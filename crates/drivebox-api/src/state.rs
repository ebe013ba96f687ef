//! Application state shared across all handlers.

use std::sync::Arc;

use drivebox_core::config::AppConfig;
use drivebox_database::repositories::entry::EntryStore;
use drivebox_service::entry::EntryMoveService;

use crate::auth::JwtDecoder;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// JWT token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Entry store.
    pub entry_store: Arc<dyn EntryStore>,
    /// Batch move service.
    pub move_service: Arc<EntryMoveService>,
}
