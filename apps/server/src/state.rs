//! Shared application state.

use std::sync::Arc;

use tradepost_db::Database;
use tradepost_sync::{Reconciler, SyncClient, SyncResult, SyncState};

use crate::config::ServerConfig;

/// State behind every handler: the database, the loaded configuration and
/// the sync machinery. Cloned cheaply via `Arc` by the router.
pub struct AppState {
    pub db: Database,
    pub config: ServerConfig,
    pub sync_state: SyncState,
    pub sync_client: SyncClient,
}

impl AppState {
    pub fn new(db: Database, config: ServerConfig) -> SyncResult<Arc<Self>> {
        let sync_client = SyncClient::new()?;
        Ok(Arc::new(Self {
            db,
            config,
            sync_state: SyncState::new(),
            sync_client,
        }))
    }

    /// Reconciler over this instance's database, used by both sync paths.
    pub fn reconciler(&self) -> Reconciler {
        Reconciler::new(self.db.clone())
    }
}
