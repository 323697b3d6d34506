use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use utoipa::ToSchema;

/// UserAccount
///
/// One entry of the fixed user directory. The `password` field holds the
/// credential in the form produced by the configured `PasswordEncoder`
/// (plaintext under the no-op encoder, an argon2 PHC string otherwise).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub username: String,
    pub password: String,
    pub roles: BTreeSet<String>,
}

impl UserAccount {
    pub fn new<I, R>(username: &str, password: &str, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }
}

/// Principal
///
/// The resolved identity of an authenticated request. Carries no credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub username: String,
    pub roles: BTreeSet<String>,
}

impl From<&UserAccount> for Principal {
    fn from(account: &UserAccount) -> Self {
        Self {
            username: account.username.clone(),
            roles: account.roles.clone(),
        }
    }
}

/// Caller
///
/// Who is making the request, as seen by the access policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    Anonymous,
    Authenticated(Principal),
}

impl Caller {
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Caller::Anonymous => None,
            Caller::Authenticated(principal) => Some(principal),
        }
    }
}

/// ErrorBody
///
/// JSON payload returned alongside every 401/403/404.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    // Stable machine-readable code, e.g. "FORBIDDEN".
    pub error: String,
    pub message: String,
}
