use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Authenticated Router Module
///
/// Endpoints for signed-in callers. The matching policy rule is
/// `has_any_role("/user", ["user", "admin"])`: roles are flat, so "admin" is
/// listed explicitly rather than implied.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // GET /user
        .route("/user", get(handlers::user_home))
}
