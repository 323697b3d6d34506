use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Admin Router Module
///
/// Endpoints exclusively for the "admin" role (`has_role("/admin", "admin")`).
/// A caller holding only "user" receives 403 here.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /admin
        .route("/admin", get(handlers::admin_home))
}
