use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString,
};
use rand::rngs::OsRng;
use std::sync::Arc;

use crate::{config::PasswordEncoding, error::AuthError};

/// PasswordEncoder
///
/// Abstracts how stored credentials are produced and compared, so the user
/// directory never needs to know whether it holds plaintext or hashes.
pub trait PasswordEncoder: Send + Sync {
    /// Produces the stored form of a raw password.
    fn encode(&self, raw: &str) -> Result<String, AuthError>;

    /// Checks a presented raw password against a stored, encoded one.
    fn matches(&self, raw: &str, encoded: &str) -> bool;

    /// Short name used in startup logs.
    fn name(&self) -> &'static str;
}

/// Shared, thread-safe handle held by the application state.
pub type EncoderState = Arc<dyn PasswordEncoder>;

/// NoOpPasswordEncoder
///
/// Stores and compares passwords in plaintext. This reproduces the original demo
/// and is INSECURE: it exists for local testing only and is refused in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpPasswordEncoder;

impl PasswordEncoder for NoOpPasswordEncoder {
    fn encode(&self, raw: &str) -> Result<String, AuthError> {
        Ok(raw.to_string())
    }

    fn matches(&self, raw: &str, encoded: &str) -> bool {
        raw == encoded
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}

/// Argon2PasswordEncoder
///
/// Salted argon2id hashes in PHC string format.
#[derive(Default)]
pub struct Argon2PasswordEncoder {
    argon2: Argon2<'static>,
}

impl PasswordEncoder for Argon2PasswordEncoder {
    fn encode(&self, raw: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(raw.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Encoding(e.to_string()))
    }

    fn matches(&self, raw: &str, encoded: &str) -> bool {
        // A stored value that is not a PHC string can never match.
        match PasswordHash::new(encoded) {
            Ok(parsed) => self
                .argon2
                .verify_password(raw.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    fn name(&self) -> &'static str {
        "argon2"
    }
}

/// Builds the encoder selected by configuration.
pub fn encoder_for(encoding: PasswordEncoding) -> EncoderState {
    match encoding {
        PasswordEncoding::NoOp => Arc::new(NoOpPasswordEncoder),
        PasswordEncoding::Argon2 => Arc::new(Argon2PasswordEncoder::default()),
    }
}
