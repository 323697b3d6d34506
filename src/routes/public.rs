use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Public Router Module
///
/// Endpoints reachable without credentials. The matching policy rule is
/// `permit_all("/")`.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /
        // Static landing page.
        .route("/", get(handlers::home))
}
