//! HTTP handlers and route configuration.

mod health;
pub(crate) mod posts;

use actix_web::web;

/// Largest request body accepted on the posts routes (6 MiB).
pub(crate) const MAX_BODY_BYTES: usize = 6 * 1024 * 1024;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::PayloadConfig::new(MAX_BODY_BYTES))
            .app_data(web::JsonConfig::default().limit(MAX_BODY_BYTES))
            .route("/health", web::get().to(health::health_check))
            // Every method reaches the posts handler; it answers 405 itself.
            .route("/posts", web::route().to(posts::dispatch))
            .route("/posts/{id}", web::route().to(posts::dispatch))
            .route("/invoke", web::post().to(posts::invoke)),
    );
}
