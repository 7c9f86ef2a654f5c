//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use quill_core::HandlerConfig;
use quill_infra::ConnectionSettings;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub handler: HandlerConfig,
    pub connection: ConnectionSettings,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());

        let defaults = ConnectionSettings::default();
        let connection = ConnectionSettings {
            connect_timeout: env::var("DB_CONNECT_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.connect_timeout),
            sql_logging: env::var("DB_SQL_LOGGING")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(defaults.sql_logging),
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            handler: HandlerConfig::new(database_url),
            connection,
        }
    }
}
