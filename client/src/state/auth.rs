//! Auth-session view model for the current browser tab.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mirrors the session context into a signal-friendly value. Route guards and
//! user-aware components read it; only the session context's subscriber
//! writes the `session` half, and the app toggles `loading` around restore.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::UserProfile;
use crate::state::session::SessionState;

/// Authentication state tracking the current session and restore status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub session: SessionState,
    /// True while the startup token restore is in flight.
    pub loading: bool,
}

impl AuthState {
    /// State at startup, before the stored token has been checked.
    #[must_use]
    pub fn restoring() -> Self {
        Self { session: SessionState::Anonymous, loading: true }
    }

    #[must_use]
    pub fn user(&self) -> Option<&UserProfile> {
        self.session.user()
    }
}
