//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database_configured: bool,
    pub timestamp: String,
}

/// GET /api/health
///
/// Never touches the database; reports only whether a connection string is set.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        database_configured: state.database_configured,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
