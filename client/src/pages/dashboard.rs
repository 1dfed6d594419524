//! User dashboard: account overview, settings editor, sign-out.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route (`/` redirects here). Anonymous
//! visitors are sent to `/login` once the startup restore has finished.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::app::AppSession;
use crate::components::account_panel::AccountPanel;
use crate::components::user_settings::UserSettings;
use crate::state::auth::AuthState;
use crate::util::auth::{ADMIN_PATH, Capability, GuardDecision, guard, install_guard_redirect};

/// Dashboard page. Redirects to `/login` if the user is not authenticated.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = expect_context::<AppSession>();
    install_guard_redirect(auth, Capability::Authenticated, use_navigate());

    let show_settings = RwSignal::new(false);

    // The guard effect navigates to /login once the state flips to anonymous.
    let on_logout = Callback::new(move |()| session.logout());
    let on_settings_close = Callback::new(move |()| show_settings.set(false));

    let email = move || auth.get().user().map(|u| u.email.clone()).unwrap_or_default();

    view! {
        <Show
            when=move || guard(&auth.get(), Capability::Authenticated) == GuardDecision::Allow
            fallback=move || {
                view! {
                    <div class="dashboard-page">
                        <p>{move || if auth.get().loading { "Loading..." } else { "Redirecting to login..." }}</p>
                    </div>
                }
            }
        >
            <div class="dashboard-page">
                <header class="dashboard-page__header toolbar">
                    <span class="toolbar__title">"User Dashboard"</span>
                    <span class="toolbar__spacer"></span>
                    <button
                        class="btn toolbar__settings"
                        title="Account settings"
                        on:click=move |_| show_settings.update(|open| *open = !*open)
                    >
                        {email}
                    </button>
                    <Show when=move || auth.get().session.is_admin()>
                        <span class="toolbar__link">
                            <A href=ADMIN_PATH>"Admin Panel"</A>
                        </span>
                    </Show>
                    <button class="btn btn--primary" on:click=move |_| on_logout.run(())>
                        "Logout"
                    </button>
                </header>

                <main class="dashboard-page__body">
                    <h1>"Welcome to your dashboard"</h1>
                    <p>"Here you can manage your account and view your information."</p>
                    <Show when=move || show_settings.get() fallback=|| view! { <AccountPanel/> }>
                        <UserSettings on_close=on_settings_close/>
                    </Show>
                </main>
            </div>
        </Show>
    }
}
