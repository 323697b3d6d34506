use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::ErrorBody;

/// AuthError
///
/// The terminal outcomes of the security layer. Every variant maps to a single
/// HTTP status and is returned to the client as-is; nothing is retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No credentials were presented for a role-guarded path.
    #[error("authentication is required to access this resource")]
    Unauthenticated {
        realm: String,
    },

    /// Credentials were presented but malformed, unknown or wrong.
    #[error("bad credentials")]
    BadCredentials {
        realm: String,
    },

    /// Valid credentials, insufficient role.
    #[error("access denied")]
    Forbidden,

    #[error("not found")]
    NotFound,

    /// The password encoder failed to produce a hash.
    #[error("password encoding failed: {0}")]
    Encoding(String),
}

impl AuthError {
    pub fn client_code(&self) -> &'static str {
        match self {
            AuthError::Unauthenticated { .. } => "UNAUTHENTICATED",
            AuthError::BadCredentials { .. } => "BAD_CREDENTIALS",
            AuthError::Forbidden => "FORBIDDEN",
            AuthError::NotFound => "NOT_FOUND",
            AuthError::Encoding(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Unauthenticated { .. } | AuthError::BadCredentials { .. } => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::NotFound => StatusCode::NOT_FOUND,
            AuthError::Encoding(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The Basic challenge sent with every 401, prompting the client for credentials.
    fn challenge(&self) -> Option<HeaderValue> {
        match self {
            AuthError::Unauthenticated { realm } | AuthError::BadCredentials { realm } => {
                let value = format!("Basic realm=\"{}\", charset=\"UTF-8\"", realm.replace('"', ""));
                HeaderValue::from_str(&value).ok()
            }
            _ => None,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        let challenge = self.challenge();
        let body = Json(ErrorBody {
            error: self.client_code().to_string(),
            message: self.to_string(),
        });

        let mut response = (status, body).into_response();
        if let Some(value) = challenge {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, value);
        }
        response
    }
}
