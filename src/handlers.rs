use axum::response::Html;

use crate::{error::AuthError, models::ErrorBody};

pub const HOME_BODY: &str = "<h1> Welcome Home </h1>";
pub const USER_BODY: &str = "<h1> Welcome Home User</h1>";
pub const ADMIN_BODY: &str = "<h1> Welcome Home Admin</h1>";

/// home
///
/// [Public Route] Landing page, open to anonymous callers.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Welcome page", body = String, content_type = "text/html"))
)]
pub async fn home() -> Html<&'static str> {
    Html(HOME_BODY)
}

/// user_home
///
/// [Authenticated Route] Requires the "user" or "admin" role. The check happens in
/// the access middleware before this handler runs.
#[utoipa::path(
    get,
    path = "/user",
    responses(
        (status = 200, description = "User welcome page", body = String, content_type = "text/html"),
        (status = 401, description = "Missing or bad credentials", body = ErrorBody),
        (status = 403, description = "Role not permitted", body = ErrorBody)
    )
)]
pub async fn user_home() -> Html<&'static str> {
    Html(USER_BODY)
}

/// admin_home
///
/// [Admin Route] Requires the "admin" role.
#[utoipa::path(
    get,
    path = "/admin",
    responses(
        (status = 200, description = "Admin welcome page", body = String, content_type = "text/html"),
        (status = 401, description = "Missing or bad credentials", body = ErrorBody),
        (status = 403, description = "Role not permitted", body = ErrorBody)
    )
)]
pub async fn admin_home() -> Html<&'static str> {
    Html(ADMIN_BODY)
}

// Router fallback for every path outside the defined routes.
pub async fn not_found() -> AuthError {
    AuthError::NotFound
}
