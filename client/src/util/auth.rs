//! Route guard: who may see which view.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components apply identical redirect behavior. [`check`] is the pure
//! decision over the session state; [`guard`] layers the "restore still in
//! flight" case on top so a reload does not bounce a signed-in user to
//! `/login` before the stored token has been checked.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::AuthState;
use crate::state::session::SessionState;

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const ADMIN_PATH: &str = "/admin";

/// Named access requirement of a view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    Authenticated,
    Admin,
}

/// Outcome of [`check`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Granted,
    Redirect(&'static str),
}

/// Outcome of [`guard`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Session restore is still running; render a placeholder.
    Wait,
    Redirect(&'static str),
}

/// Decide whether `state` satisfies `capability`.
#[must_use]
pub fn check(state: &SessionState, capability: Capability) -> Access {
    match (capability, state) {
        (_, SessionState::Anonymous) => Access::Redirect(LOGIN_PATH),
        (Capability::Authenticated, SessionState::Authenticated(_)) => Access::Granted,
        (Capability::Admin, SessionState::Authenticated(user)) if user.role.is_admin() => Access::Granted,
        (Capability::Admin, SessionState::Authenticated(_)) => Access::Redirect(DASHBOARD_PATH),
    }
}

/// [`check`] that waits out an in-flight restore.
#[must_use]
pub fn guard(auth: &AuthState, capability: Capability) -> GuardDecision {
    match check(&auth.session, capability) {
        Access::Granted => GuardDecision::Allow,
        Access::Redirect(_) if auth.loading => GuardDecision::Wait,
        Access::Redirect(path) => GuardDecision::Redirect(path),
    }
}

/// Navigate away whenever `capability` stops holding, once restore finished.
pub fn install_guard_redirect<F>(auth: RwSignal<AuthState>, capability: Capability, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let GuardDecision::Redirect(path) = guard(&auth.get(), capability) {
            navigate(path, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}

/// Send a signed-in visitor of `/login` or `/register` on to the dashboard.
pub fn install_signed_in_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if auth.get().session.is_authenticated() {
            navigate(DASHBOARD_PATH, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
