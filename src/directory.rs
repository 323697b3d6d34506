use async_trait::async_trait;
use std::{collections::HashMap, sync::Arc};

use crate::{error::AuthError, models::UserAccount, password::PasswordEncoder};

/// UserDirectory Trait
///
/// The lookup contract the credential verifier depends on. Handlers and the
/// verifier only ever see this trait, so tests can substitute their own
/// directory without touching the HTTP layer.
///
/// **Send + Sync + async_trait** keep `Arc<dyn UserDirectory>` usable across
/// Axum's task boundaries.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Exact, case-sensitive lookup by username.
    async fn load_user(&self, username: &str) -> Option<UserAccount>;
}

/// Shared handle stored in `AppState`.
pub type DirectoryState = Arc<dyn UserDirectory>;

/// The fixed demo users as (username, raw password, roles).
pub const SEED_USERS: &[(&str, &str, &[&str])] = &[
    ("abhishek", "star-tech", &["admin"]),
    ("warrior", "war", &["user"]),
];

/// InMemoryUserDirectory
///
/// Immutable after construction. Built once at startup and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    users: HashMap<String, UserAccount>,
}

impl InMemoryUserDirectory {
    /// Builds a directory from accounts whose passwords are already encoded.
    /// A later duplicate username replaces an earlier one.
    pub fn new(accounts: impl IntoIterator<Item = UserAccount>) -> Self {
        let users = accounts
            .into_iter()
            .map(|account| (account.username.clone(), account))
            .collect();
        Self { users }
    }

    /// with_encoded_users
    ///
    /// Builds a directory from raw (username, password, roles) triples, running every
    /// password through `encoder` first so the stored form matches what the verifier
    /// will compare against.
    pub fn with_encoded_users(
        seed: &[(&str, &str, &[&str])],
        encoder: &dyn PasswordEncoder,
    ) -> Result<Self, AuthError> {
        let mut accounts = Vec::with_capacity(seed.len());
        for (username, raw, roles) in seed {
            let encoded = encoder.encode(raw)?;
            accounts.push(UserAccount::new(username, &encoded, roles.iter().copied()));
        }
        Ok(Self::new(accounts))
    }

    /// The two fixed demo users, encoded with `encoder`.
    pub fn seeded(encoder: &dyn PasswordEncoder) -> Result<Self, AuthError> {
        Self::with_encoded_users(SEED_USERS, encoder)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn load_user(&self, username: &str) -> Option<UserAccount> {
        self.users.get(username).cloned()
    }
}
