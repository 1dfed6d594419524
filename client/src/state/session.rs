//! Session context: the tab-wide authentication state machine.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages never talk to the account API or the token store directly. They call
//! the methods here, which sequence the backend call, the token write, and the
//! state transition, then notify subscribers. The app bridges subscribers into
//! an `RwSignal<AuthState>` so views re-render on every transition.
//!
//! DESIGN
//! ======
//! Two states, `Anonymous` and `Authenticated(profile)`. The context is an
//! explicit value handed out through Leptos context, cloned cheaply (shared
//! inner state), never a global.
//!
//! Every identity change (sign-in, sign-out, failed restore) advances an epoch.
//! Restore and profile-update responses carry the epoch they started under and
//! are dropped if it moved, so a late response cannot resurrect a session the
//! user already left. Overlapping updates within one session are
//! last-write-wins.
//!
//! ERROR HANDLING
//! ==============
//! `login`/`register`/`update_user_details` surface [`AuthError`] with fixed
//! human-readable messages. `restore` surfaces [`RestoreError`], which callers
//! log and otherwise ignore; the store is already cleared by then.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::net::api::{ApiError, AuthService};
use crate::net::types::{ProfilePatch, UserProfile};
use crate::util::session_store::SessionStore;

/// Authentication state of the tab.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated(UserProfile),
}

impl SessionState {
    #[must_use]
    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(user) => Some(user),
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(|u| u.role.is_admin())
    }
}

/// Session-level failure shown inline by the views.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Login failed. Please check your credentials.")]
    Login(#[source] ApiError),
    #[error("Registration failed. Please try again.")]
    Register(#[source] ApiError),
    #[error("Failed to update user details. Please try again.")]
    Update(#[source] ApiError),
    #[error("Could not refresh your account details.")]
    Refresh(#[source] ApiError),
    #[error("You need to be signed in to do that.")]
    NotAuthenticated,
}

/// The persisted token could not be turned back into a session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("stored session token was rejected")]
pub struct RestoreError(#[source] pub ApiError);

/// Handle returned by [`SessionContext::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&SessionState) + Send + Sync>;

#[derive(Default)]
struct Inner {
    state: SessionState,
    epoch: u64,
    next_subscription: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

/// Orchestrates the account API and the token store for one tab.
pub struct SessionContext<A, S> {
    service: Arc<A>,
    store: Arc<S>,
    inner: Arc<Mutex<Inner>>,
}

impl<A, S> Clone for SessionContext<A, S> {
    fn clone(&self) -> Self {
        Self { service: Arc::clone(&self.service), store: Arc::clone(&self.store), inner: Arc::clone(&self.inner) }
    }
}

impl<A: AuthService, S: SessionStore> SessionContext<A, S> {
    /// Build an anonymous context. Call [`restore`](Self::restore) once at
    /// startup to pick up a token left by an earlier visit.
    pub fn new(service: A, store: S) -> Self {
        Self { service: Arc::new(service), store: Arc::new(store), inner: Arc::new(Mutex::new(Inner::default())) }
    }

    pub fn service(&self) -> &A {
        &self.service
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.lock().state.clone()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.lock().state.user().cloned()
    }

    /// The persisted session token, if any.
    pub fn token(&self) -> Option<String> {
        self.store.load()
    }

    /// Register a listener called with the new state after every transition.
    pub fn subscribe(&self, listener: impl Fn(&SessionState) + Send + Sync + 'static) -> SubscriptionId {
        let mut inner = self.lock();
        let id = SubscriptionId(inner.next_subscription);
        inner.next_subscription += 1;
        inner.listeners.push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.lock().listeners.retain(|(existing, _)| *existing != id);
    }

    /// Rebuild the session from a persisted token.
    ///
    /// No token: nothing happens. Accepted token: `Authenticated`. Rejected
    /// token: the store is cleared and the tab stays `Anonymous`.
    ///
    /// # Errors
    ///
    /// Returns [`RestoreError`] when the backend rejects the stored token.
    pub async fn restore(&self) -> Result<(), RestoreError> {
        let Some(token) = self.store.load() else {
            return Ok(());
        };
        let epoch = self.epoch();

        match self.service.fetch_profile(&token).await {
            Ok(user) => {
                if !self.commit(Some(epoch), true, SessionState::Authenticated(user)) {
                    log::debug!("discarding restored session; session changed while restoring");
                }
                Ok(())
            }
            Err(e) => {
                log::warn!("session restore failed: {e}");
                // A sign-in that finished meanwhile owns the store now.
                if self.store.load().as_deref() == Some(token.as_str()) {
                    self.store.clear();
                }
                self.commit(Some(epoch), true, SessionState::Anonymous);
                Err(RestoreError(e))
            }
        }
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Login`] when the backend rejects the credentials
    /// or the request fails; the state is left untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, AuthError> {
        let response = self.service.login(email, password).await.map_err(|e| {
            log::warn!("login failed: {e}");
            AuthError::Login(e)
        })?;
        Ok(self.establish(&response.token, response.user))
    }

    /// Create an account and sign into it.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Register`] on conflict, invalid input, or request
    /// failure; the state is left untouched.
    pub async fn register(&self, email: &str, password: &str) -> Result<UserProfile, AuthError> {
        let response = self.service.register(email, password).await.map_err(|e| {
            log::warn!("registration failed: {e}");
            AuthError::Register(e)
        })?;
        Ok(self.establish(&response.token, response.user))
    }

    /// Drop the session. Idempotent.
    pub fn logout(&self) {
        self.store.clear();
        self.commit(None, true, SessionState::Anonymous);
        log::info!("signed out");
    }

    /// Send `patch` to the backend and adopt the profile it returns.
    ///
    /// Local state changes only after the backend confirms; a failed update
    /// leaves the current profile exactly as it was. An empty patch returns
    /// the current profile without a request.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotAuthenticated`] when there is no session (or it
    /// ended while the request was in flight), and [`AuthError::Update`] when
    /// the backend rejects the change.
    pub async fn update_user_details(&self, patch: ProfilePatch) -> Result<UserProfile, AuthError> {
        let (current, epoch) = {
            let inner = self.lock();
            (inner.state.user().cloned(), inner.epoch)
        };
        let Some(current) = current else {
            return Err(AuthError::NotAuthenticated);
        };
        if patch.is_empty() {
            return Ok(current);
        }
        let Some(token) = self.store.load() else {
            return Err(AuthError::NotAuthenticated);
        };

        let updated = self.service.update_profile(&token, &patch).await.map_err(|e| {
            log::warn!("profile update failed: {e}");
            AuthError::Update(e)
        })?;

        if !self.commit(Some(epoch), false, SessionState::Authenticated(updated.clone())) {
            log::debug!("discarding profile update; session changed while saving");
            return Err(AuthError::NotAuthenticated);
        }
        Ok(updated)
    }

    /// Re-read the signed-in profile with the stored token, e.g. after an
    /// admin changed their own role.
    ///
    /// Only a rejected token (401) ends the session; a network or server
    /// hiccup keeps both the session and the stored token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotAuthenticated`] without a session (or when it
    /// changed meanwhile), and [`AuthError::Refresh`] when the fetch fails.
    pub async fn refresh(&self) -> Result<UserProfile, AuthError> {
        let epoch = {
            let inner = self.lock();
            if !inner.state.is_authenticated() {
                return Err(AuthError::NotAuthenticated);
            }
            inner.epoch
        };
        let Some(token) = self.store.load() else {
            return Err(AuthError::NotAuthenticated);
        };

        match self.service.fetch_profile(&token).await {
            Ok(user) => {
                if !self.commit(Some(epoch), false, SessionState::Authenticated(user.clone())) {
                    log::debug!("discarding refreshed profile; session changed while fetching");
                    return Err(AuthError::NotAuthenticated);
                }
                Ok(user)
            }
            Err(e) if e.is_unauthorized() => {
                log::warn!("session token rejected on refresh: {e}");
                if self.store.load().as_deref() == Some(token.as_str()) {
                    self.store.clear();
                }
                self.commit(Some(epoch), true, SessionState::Anonymous);
                Err(AuthError::Refresh(e))
            }
            Err(e) => {
                log::warn!("profile refresh failed: {e}");
                Err(AuthError::Refresh(e))
            }
        }
    }

    fn establish(&self, token: &str, user: UserProfile) -> UserProfile {
        self.store.save(token);
        log::info!("session established for user {}", user.id);
        self.commit(None, true, SessionState::Authenticated(user.clone()));
        user
    }

    fn epoch(&self) -> u64 {
        self.lock().epoch
    }

    /// Apply `next` unless `expected_epoch` is stale, then notify listeners
    /// outside the lock. Returns whether the transition happened.
    fn commit(&self, expected_epoch: Option<u64>, advance_epoch: bool, next: SessionState) -> bool {
        let listeners = {
            let mut inner = self.lock();
            if expected_epoch.is_some_and(|epoch| epoch != inner.epoch) {
                return false;
            }
            if advance_epoch {
                inner.epoch += 1;
            }
            inner.state = next.clone();
            inner.listeners.iter().map(|(_, l)| Arc::clone(l)).collect::<Vec<_>>()
        };
        for listener in listeners {
            listener(&next);
        }
        true
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
