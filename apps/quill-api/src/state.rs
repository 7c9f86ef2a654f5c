//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::PostStore;
use quill_core::{HandlerConfig, PostHandler};
use quill_infra::ConnectionSettings;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostHandler,
    pub database_configured: bool,
}

impl AppState {
    /// Build the state with the store selected by enabled features.
    pub fn new(handler_config: HandlerConfig, connection: ConnectionSettings) -> Self {
        #[cfg(feature = "postgres")]
        let store: Arc<dyn PostStore> = Arc::new(quill_infra::PostgresPostStore::new(connection));

        #[cfg(not(feature = "postgres"))]
        let store: Arc<dyn PostStore> = {
            let _ = connection;
            tracing::info!("Running without postgres feature - using in-memory post store");
            Arc::new(quill_infra::InMemoryPostStore::new())
        };

        if handler_config.database_url.is_none() {
            tracing::warn!("DATABASE_URL not set. Post requests will answer 500.");
        }

        Self::with_store(store, handler_config)
    }

    pub fn with_store(store: Arc<dyn PostStore>, handler_config: HandlerConfig) -> Self {
        let database_configured = handler_config.database_url.is_some();
        Self {
            posts: PostHandler::new(store, handler_config),
            database_configured,
        }
    }
}
