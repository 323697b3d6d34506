use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};

use crate::{
    directory::DirectoryState,
    error::AuthError,
    models::{Caller, Principal},
    password::EncoderState,
};

/// CredentialVerifier
///
/// Resolves a username/password pair to a `Principal`. The user directory and the
/// password encoder are injected at construction time; the verifier itself is
/// stateless and cheap to clone.
#[derive(Clone)]
pub struct CredentialVerifier {
    directory: DirectoryState,
    encoder: EncoderState,
    realm: String,
}

impl CredentialVerifier {
    pub fn new(directory: DirectoryState, encoder: EncoderState, realm: impl Into<String>) -> Self {
        Self {
            directory,
            encoder,
            realm: realm.into(),
        }
    }

    pub fn realm(&self) -> &str {
        &self.realm
    }

    /// verify
    ///
    /// Exact, case-sensitive match on both username and password. An unknown user and
    /// a wrong password produce the same rejection.
    pub async fn verify(&self, username: &str, password: &str) -> Result<Principal, AuthError> {
        let rejected = || AuthError::BadCredentials {
            realm: self.realm.clone(),
        };

        let account = self.directory.load_user(username).await.ok_or_else(|| {
            tracing::warn!(%username, "authentication failed: unknown user");
            rejected()
        })?;

        if !self.encoder.matches(password, &account.password) {
            tracing::warn!(%username, "authentication failed: bad password");
            return Err(rejected());
        }

        tracing::debug!(%username, roles = ?account.roles, "authenticated");
        Ok(Principal::from(&account))
    }
}

/// parse_basic
///
/// Decodes an `Authorization: Basic <base64(user:pass)>` value. The scheme name is
/// case-insensitive; the password may itself contain ':'.
pub fn parse_basic(value: &str) -> Option<(String, String)> {
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = BASE64.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

/// Caller Extractor Implementation
///
/// Resolves who is calling from the request headers:
/// 1. No `Authorization` header: `Caller::Anonymous`.
/// 2. A well-formed Basic header with valid credentials: `Caller::Authenticated`.
/// 3. Anything else (other schemes, undecodable values, bad credentials): rejected
///    with 401 and a Basic challenge.
///
/// Whether an anonymous caller may proceed is decided later by the access policy.
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
    CredentialVerifier: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let verifier = CredentialVerifier::from_ref(state);

        let Some(value) = parts.headers.get(header::AUTHORIZATION) else {
            return Ok(Caller::Anonymous);
        };

        let malformed = || {
            tracing::warn!("rejected malformed Authorization header");
            AuthError::BadCredentials {
                realm: verifier.realm().to_string(),
            }
        };

        let value = value.to_str().map_err(|_| malformed())?;
        let (username, password) = parse_basic(value).ok_or_else(malformed)?;

        let principal = verifier.verify(&username, &password).await?;
        Ok(Caller::Authenticated(principal))
    }
}
