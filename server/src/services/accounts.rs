//! In-memory account directory: users, credentials, and bearer sessions.
//!
//! SYSTEM CONTEXT
//! ==============
//! Backs every `/api` route. The browser app only ever sees [`UserProfile`]
//! values and opaque tokens; salts and digests never leave this module.
//!
//! DESIGN
//! ======
//! One `tokio::sync::RwLock` guards three maps: accounts by id, account id by
//! normalized email, and account id by session token. Every mutation that
//! touches more than one map happens under a single write guard, so lookups
//! never observe a half-applied registration or email change.
//!
//! TRADE-OFFS
//! ==========
//! Nothing is persisted and tokens never expire. Restarting the process signs
//! everyone out and forgets registered accounts.
//!
//! Sign-out is client-side only, so the session map only grows: every login
//! and registration adds a token that stays valid for the process lifetime.
//! Memory use is bounded by the number of sign-ins since startup.

#[cfg(test)]
#[path = "accounts_test.rs"]
mod tests;

use std::collections::HashMap;

use client::net::types::{AuthResponse, ProfilePatch, Role, UserProfile};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::token::{generate_salt, generate_token, hash_password, verify_password};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("invalid email")]
    InvalidEmail,
    #[error("password must not be empty")]
    InvalidPassword,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("email already registered")]
    EmailTaken,
    #[error("invalid session token")]
    InvalidToken,
    #[error("admin role required")]
    Forbidden,
    #[error("user not found: {0}")]
    NotFound(String),
    #[error("{0} must not be empty")]
    InvalidField(&'static str),
}

#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    let (local, domain) = normalized.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return None;
    }
    Some(normalized)
}

fn name_from_email(email: &str) -> String {
    email
        .split('@')
        .next()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or("user")
        .to_owned()
}

struct Account {
    profile: UserProfile,
    salt: String,
    password_hash: String,
}

impl Account {
    fn new(profile: UserProfile, password: &str) -> Self {
        let salt = generate_salt();
        let password_hash = hash_password(&salt, password);
        Self { profile, salt, password_hash }
    }
}

#[derive(Default)]
struct Directory {
    accounts: HashMap<String, Account>,
    by_email: HashMap<String, String>,
    sessions: HashMap<String, String>,
}

impl Directory {
    fn insert(&mut self, account: Account) {
        let id = account.profile.id.clone();
        self.by_email.insert(account.profile.email.clone(), id.clone());
        self.accounts.insert(id, account);
    }

    fn open_session(&mut self, user_id: &str) -> String {
        let token = generate_token();
        self.sessions.insert(token.clone(), user_id.to_owned());
        token
    }

    fn account_for_token(&self, token: &str) -> Result<&Account, AccountError> {
        self.sessions
            .get(token)
            .and_then(|id| self.accounts.get(id))
            .ok_or(AccountError::InvalidToken)
    }

    fn require_admin(&self, token: &str) -> Result<(), AccountError> {
        if self.account_for_token(token)?.profile.role.is_admin() {
            Ok(())
        } else {
            Err(AccountError::Forbidden)
        }
    }
}

/// A canned account inserted at startup for local demos.
struct DemoAccount {
    id: &'static str,
    email: &'static str,
    name: &'static str,
    role: Role,
}

const DEMO_ACCOUNTS: [DemoAccount; 3] = [
    DemoAccount { id: "1", email: "user1@example.com", name: "User One", role: Role::User },
    DemoAccount { id: "2", email: "user2@example.com", name: "User Two", role: Role::Admin },
    DemoAccount { id: "3", email: "user3@example.com", name: "User Three", role: Role::User },
];

#[derive(Default)]
pub struct AccountDirectory {
    inner: RwLock<Directory>,
}

impl AccountDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) async fn session_count(&self) -> usize {
        self.inner.read().await.sessions.len()
    }

    /// Insert the demo accounts, skipping any email already present.
    /// Returns how many were inserted.
    pub async fn seed_demo(&self, password: &str) -> usize {
        let mut dir = self.inner.write().await;
        let mut inserted = 0;
        for demo in &DEMO_ACCOUNTS {
            if dir.by_email.contains_key(demo.email) || dir.accounts.contains_key(demo.id) {
                continue;
            }
            let profile = UserProfile {
                id: demo.id.to_owned(),
                email: demo.email.to_owned(),
                name: demo.name.to_owned(),
                role: demo.role,
                address: None,
                billing_address: None,
                phone_number: None,
                location: None,
                vat_number: None,
            };
            dir.insert(Account::new(profile, password));
            inserted += 1;
        }
        inserted
    }

    /// Create a `user` account and open a session for it.
    ///
    /// # Errors
    ///
    /// [`AccountError::InvalidEmail`], [`AccountError::InvalidPassword`], or
    /// [`AccountError::EmailTaken`].
    pub async fn register(&self, email: &str, password: &str) -> Result<AuthResponse, AccountError> {
        let email = normalize_email(email).ok_or(AccountError::InvalidEmail)?;
        if password.trim().is_empty() {
            return Err(AccountError::InvalidPassword);
        }

        let mut dir = self.inner.write().await;
        if dir.by_email.contains_key(&email) {
            return Err(AccountError::EmailTaken);
        }
        let profile = UserProfile {
            id: Uuid::new_v4().to_string(),
            name: name_from_email(&email),
            email,
            role: Role::User,
            address: None,
            billing_address: None,
            phone_number: None,
            location: None,
            vat_number: None,
        };
        dir.insert(Account::new(profile.clone(), password));
        let token = dir.open_session(&profile.id);
        Ok(AuthResponse { token, user: profile })
    }

    /// Check credentials and open a new session.
    ///
    /// # Errors
    ///
    /// [`AccountError::InvalidEmail`] for a malformed address, otherwise
    /// [`AccountError::InvalidCredentials`] for an unknown email or wrong
    /// password alike.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AccountError> {
        let email = normalize_email(email).ok_or(AccountError::InvalidEmail)?;

        let mut dir = self.inner.write().await;
        let profile = dir
            .by_email
            .get(&email)
            .and_then(|id| dir.accounts.get(id))
            .filter(|account| verify_password(&account.salt, password, &account.password_hash))
            .map(|account| account.profile.clone())
            .ok_or(AccountError::InvalidCredentials)?;
        let token = dir.open_session(&profile.id);
        Ok(AuthResponse { token, user: profile })
    }

    /// # Errors
    ///
    /// [`AccountError::InvalidToken`] for an unknown token.
    pub async fn profile(&self, token: &str) -> Result<UserProfile, AccountError> {
        let dir = self.inner.read().await;
        Ok(dir.account_for_token(token)?.profile.clone())
    }

    /// Apply `patch` to the token owner's profile and return the result.
    ///
    /// # Errors
    ///
    /// [`AccountError::InvalidToken`], [`AccountError::InvalidField`] for a
    /// blank name, [`AccountError::InvalidEmail`], or
    /// [`AccountError::EmailTaken`] when the new email belongs to someone else.
    pub async fn update_profile(&self, token: &str, patch: &ProfilePatch) -> Result<UserProfile, AccountError> {
        let mut patch = patch.clone();
        if patch.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(AccountError::InvalidField("name"));
        }
        if let Some(email) = patch.email.as_deref() {
            patch.email = Some(normalize_email(email).ok_or(AccountError::InvalidEmail)?);
        }

        let mut dir = self.inner.write().await;
        let current = dir.account_for_token(token)?.profile.clone();
        if let Some(email) = patch.email.as_deref() {
            if dir.by_email.get(email).is_some_and(|owner| *owner != current.id) {
                return Err(AccountError::EmailTaken);
            }
        }

        let updated = current.merged(&patch);
        if updated.email != current.email {
            dir.by_email.remove(&current.email);
            dir.by_email.insert(updated.email.clone(), updated.id.clone());
        }
        let account = dir
            .accounts
            .get_mut(&current.id)
            .ok_or_else(|| AccountError::NotFound(current.id.clone()))?;
        account.profile = updated.clone();
        Ok(updated)
    }

    /// All profiles ordered by email. Admin only.
    ///
    /// # Errors
    ///
    /// [`AccountError::InvalidToken`] or [`AccountError::Forbidden`].
    pub async fn list_profiles(&self, token: &str) -> Result<Vec<UserProfile>, AccountError> {
        let dir = self.inner.read().await;
        dir.require_admin(token)?;
        let mut users = dir.accounts.values().map(|a| a.profile.clone()).collect::<Vec<_>>();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(users)
    }

    /// Change an account's role. Admin only; admins may demote themselves.
    ///
    /// # Errors
    ///
    /// [`AccountError::InvalidToken`], [`AccountError::Forbidden`], or
    /// [`AccountError::NotFound`].
    pub async fn set_role(&self, token: &str, user_id: &str, role: Role) -> Result<UserProfile, AccountError> {
        let mut dir = self.inner.write().await;
        dir.require_admin(token)?;
        let account = dir
            .accounts
            .get_mut(user_id)
            .ok_or_else(|| AccountError::NotFound(user_id.to_owned()))?;
        account.profile.role = role;
        Ok(account.profile.clone())
    }
}
