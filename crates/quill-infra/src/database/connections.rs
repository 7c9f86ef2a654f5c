use std::time::Duration;

#[cfg(feature = "postgres")]
use async_trait::async_trait;
#[cfg(feature = "postgres")]
use quill_core::error::RepoError;
#[cfg(feature = "postgres")]
use quill_core::ports::{PostRepository, PostStore};
#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, Database};

#[cfg(feature = "postgres")]
use super::postgres_repo::{PostgresPostRepository, map_db_err};

/// Driver settings for per-invocation connections.
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    pub connect_timeout: Duration,
    /// Log every statement through sqlx.
    pub sql_logging: bool,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            sql_logging: false,
        }
    }
}

/// Opens a single dedicated PostgreSQL connection for each invocation.
///
/// Pooling across invocations is left to whatever hosts the handler.
#[cfg(feature = "postgres")]
#[derive(Debug, Clone, Default)]
pub struct PostgresPostStore {
    settings: ConnectionSettings,
}

#[cfg(feature = "postgres")]
impl PostgresPostStore {
    pub fn new(settings: ConnectionSettings) -> Self {
        Self { settings }
    }
}

#[cfg(feature = "postgres")]
#[async_trait]
impl PostStore for PostgresPostStore {
    async fn open(&self, database_url: &str) -> Result<Box<dyn PostRepository>, RepoError> {
        let opts = ConnectOptions::new(database_url)
            .max_connections(1)
            .min_connections(1)
            .connect_timeout(self.settings.connect_timeout)
            .sqlx_logging(self.settings.sql_logging)
            .to_owned();

        let db = Database::connect(opts).await.map_err(map_db_err)?;
        tracing::debug!("Database connection opened");

        Ok(Box::new(PostgresPostRepository::new(db)))
    }
}
