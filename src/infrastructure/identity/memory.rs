//! Process-local identity backend for development and tests. Accounts are
//! lost on restart.

use crate::domain::identity::{Identity, IdentityError, IdentityProvider, ProviderSession};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

const MIN_PASSWORD_LEN: usize = 6;
const ID_TOKEN_TTL_SECS: i64 = 3600;

#[derive(Debug, Clone)]
struct Account {
    uid: String,
    email: String,
    password_hash: String,
    claims: Map<String, Value>,
}

impl Account {
    fn identity(&self) -> Identity {
        Identity {
            uid: self.uid.clone(),
            email: self.email.clone(),
            claims: self.claims.clone(),
        }
    }
}

#[derive(Default)]
struct Store {
    /// Keyed by lowercased email
    accounts: HashMap<String, Account>,
    /// Provider refresh token -> lowercased email
    refresh_tokens: HashMap<String, String>,
}

#[derive(Clone, Default)]
pub struct InMemoryIdentityProvider {
    store: Arc<Mutex<Store>>,
}

fn hash_password(password: &str) -> Result<String, IdentityError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| IdentityError::Upstream(anyhow::anyhow!("Failed to hash password: {}", e)))
}

fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, IdentityError> {
        self.store
            .lock()
            .map_err(|_| IdentityError::Upstream(anyhow::anyhow!("identity store lock poisoned")))
    }

    /// Starts a new session. Earlier refresh tokens of the account stop working.
    fn issue(store: &mut Store, account: &Account) -> ProviderSession {
        let key = account.email.to_lowercase();
        let refresh_token = Uuid::new_v4().simple().to_string();
        store.refresh_tokens.retain(|_, email| *email != key);
        store.refresh_tokens.insert(refresh_token.clone(), key);
        ProviderSession {
            identity: account.identity(),
            id_token: Uuid::new_v4().simple().to_string(),
            refresh_token,
            expires_in: ID_TOKEN_TTL_SECS,
        }
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<ProviderSession, IdentityError> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(IdentityError::Rejected(
                "WEAK_PASSWORD : Password should be at least 6 characters".to_string(),
            ));
        }

        let password_hash = hash_password(password)?;
        let mut store = self.lock()?;
        let key = email.to_lowercase();
        if store.accounts.contains_key(&key) {
            return Err(IdentityError::EmailExists);
        }

        let account = Account {
            uid: Uuid::new_v4().simple().to_string(),
            email: email.to_string(),
            password_hash,
            claims: Map::new(),
        };
        store.accounts.insert(key, account.clone());
        Ok(Self::issue(&mut store, &account))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderSession, IdentityError> {
        let mut store = self.lock()?;
        let account = store
            .accounts
            .get(&email.to_lowercase())
            .filter(|a| verify_password(password, &a.password_hash))
            .cloned()
            .ok_or(IdentityError::InvalidCredentials)?;
        Ok(Self::issue(&mut store, &account))
    }

    async fn refresh(&self, refresh_token: &str) -> Result<ProviderSession, IdentityError> {
        let mut store = self.lock()?;
        let key = store
            .refresh_tokens
            .remove(refresh_token)
            .ok_or(IdentityError::InvalidRefreshToken)?;
        let account = store
            .accounts
            .get(&key)
            .cloned()
            .ok_or(IdentityError::InvalidRefreshToken)?;
        Ok(Self::issue(&mut store, &account))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityError> {
        let store = self.lock()?;
        Ok(store
            .accounts
            .get(&email.to_lowercase())
            .map(Account::identity))
    }

    async fn set_custom_claims(
        &self,
        uid: &str,
        claims: Map<String, Value>,
    ) -> Result<(), IdentityError> {
        let mut store = self.lock()?;
        let account = store
            .accounts
            .values_mut()
            .find(|a| a.uid == uid)
            .ok_or_else(|| IdentityError::UserNotFound(uid.to_string()))?;
        account.claims = claims;
        Ok(())
    }
}
