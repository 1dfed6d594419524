//! Admin dashboard: account list with per-user role changes.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reachable only with the admin capability; plain users are bounced to
//! `/dashboard` and anonymous visitors to `/login`. The account list is
//! fetched once the guard allows the view.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::app::AppSession;
use crate::net::api::ApiError;
use crate::net::types::{Role, UserProfile};
use crate::state::auth::AuthState;
use crate::util::auth::{Capability, DASHBOARD_PATH, GuardDecision, guard, install_guard_redirect};

pub(crate) const LOAD_USERS_FAILED: &str = "Failed to fetch users";
pub(crate) const UPDATE_ROLE_FAILED: &str = "Failed to update user role";

/// Swap `updated` into `users` by id. Returns false when the id is unknown.
pub(crate) fn replace_user(users: &mut [UserProfile], updated: UserProfile) -> bool {
    match users.iter_mut().find(|u| u.id == updated.id) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => false,
    }
}

pub(crate) fn user_list_toggle_label(shown: bool) -> &'static str {
    if shown { "Hide User List" } else { "Show User List" }
}

fn token_or_error(session: &AppSession) -> Result<String, ApiError> {
    session
        .token()
        .ok_or_else(|| ApiError::Status { status: 401, message: "not signed in".to_owned() })
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = expect_context::<AppSession>();
    install_guard_redirect(auth, Capability::Admin, use_navigate());

    let users = RwSignal::new(Vec::<UserProfile>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(String::new());
    let show_list = RwSignal::new(false);
    let requested = RwSignal::new(false);

    let load_session = session.clone();
    Effect::new(move || {
        if requested.get() || guard(&auth.get(), Capability::Admin) != GuardDecision::Allow {
            return;
        }
        requested.set(true);
        let session = load_session.clone();
        leptos::task::spawn_local(async move {
            let result = match token_or_error(&session) {
                Ok(token) => session.service().list_users(&token).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(list) => users.set(list),
                Err(e) if e.is_unauthorized() => {
                    log::warn!("admin user list rejected the session: {e}");
                    session.logout();
                }
                Err(e) => {
                    log::warn!("admin user list failed: {e}");
                    error.set(LOAD_USERS_FAILED.to_owned());
                }
            }
            loading.set(false);
        });
    });

    let role_session = session.clone();
    let on_role_change = Callback::new(move |(user_id, role): (String, Role)| {
        let session = role_session.clone();
        leptos::task::spawn_local(async move {
            let result = match token_or_error(&session) {
                Ok(token) => session.service().update_role(&token, &user_id, role).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(updated) => {
                    let own_account = session.user().is_some_and(|me| me.id == updated.id);
                    users.update(|list| {
                        replace_user(list, updated);
                    });
                    // Demoting yourself must take effect on the guard right away.
                    if own_account {
                        if let Err(e) = session.refresh().await {
                            log::warn!("session refresh after role change failed: {e}");
                        }
                    }
                }
                Err(e) => {
                    log::warn!("role change for {user_id} failed: {e}");
                    error.set(UPDATE_ROLE_FAILED.to_owned());
                }
            }
        });
    });

    let on_logout = Callback::new(move |()| session.logout());
    let email = move || auth.get().user().map(|u| u.email.clone()).unwrap_or_default();

    view! {
        <Show
            when=move || guard(&auth.get(), Capability::Admin) == GuardDecision::Allow
            fallback=move || {
                view! {
                    <div class="dashboard-page">
                        <p>{move || if auth.get().loading { "Loading..." } else { "Redirecting..." }}</p>
                    </div>
                }
            }
        >
            <div class="dashboard-page">
                <header class="dashboard-page__header toolbar">
                    <span class="toolbar__title">"Admin Dashboard"</span>
                    <span class="toolbar__spacer"></span>
                    <button class="btn" on:click=move |_| show_list.update(|shown| *shown = !*shown)>
                        {move || user_list_toggle_label(show_list.get())}
                    </button>
                    <span class="toolbar__identity">{email}</span>
                    <span class="toolbar__link">
                        <A href=DASHBOARD_PATH>"User Dashboard"</A>
                    </span>
                    <button class="btn btn--primary" on:click=move |_| on_logout.run(())>
                        "Logout"
                    </button>
                </header>

                <main class="dashboard-page__body">
                    <h1>"Admin Panel"</h1>
                    <p>"Manage users and system settings."</p>
                    <Show when=move || !error.get().is_empty()>
                        <p class="admin__error">{move || error.get()}</p>
                    </Show>
                    <Show when=move || loading.get()>
                        <p class="admin__loading">"Loading..."</p>
                    </Show>
                    <Show when=move || show_list.get() && !loading.get()>
                        <table class="admin__table">
                            <thead>
                                <tr>
                                    <th>"Name"</th>
                                    <th>"Email"</th>
                                    <th>"Role"</th>
                                    <th>"Actions"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || users.get()
                                    key=|user| (user.id.clone(), user.role)
                                    children=move |user: UserProfile| {
                                        let user_id = user.id.clone();
                                        view! {
                                            <tr>
                                                <td>{user.name.clone()}</td>
                                                <td>{user.email.clone()}</td>
                                                <td class="admin__role">{user.role.as_str()}</td>
                                                <td>
                                                    <select
                                                        prop:value=user.role.as_str()
                                                        on:change=move |ev| {
                                                            match event_target_value(&ev).parse::<Role>() {
                                                                Ok(role) => on_role_change.run((user_id.clone(), role)),
                                                                Err(e) => log::warn!("{e}"),
                                                            }
                                                        }
                                                    >
                                                        <option value="user">"User"</option>
                                                        <option value="admin">"Admin"</option>
                                                    </select>
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    </Show>
                </main>
            </div>
        </Show>
    }
}
