//! Read-only account summary shown on the dashboard.

#[cfg(test)]
#[path = "account_panel_test.rs"]
mod account_panel_test;

use leptos::prelude::*;

use crate::net::types::UserProfile;
use crate::state::auth::AuthState;

const EMPTY_VALUE: &str = "—";

/// Label/value rows for the account summary.
pub(crate) fn account_rows(user: &UserProfile) -> Vec<(&'static str, String)> {
    let or_empty = |value: Option<&String>| value.map_or_else(|| EMPTY_VALUE.to_owned(), Clone::clone);
    vec![
        ("Full name", user.name.clone()),
        ("Email address", user.email.clone()),
        ("Phone number", or_empty(user.phone_number.as_ref())),
        ("Address", or_empty(user.address.as_ref())),
    ]
}

#[component]
pub fn AccountPanel() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let rows = move || auth.get().user().map(account_rows).unwrap_or_default();

    view! {
        <section class="panel">
            <div class="panel__header">
                <h3>"Account Information"</h3>
                <p class="panel__subtitle">"Personal details and application."</p>
            </div>
            <dl class="panel__rows">
                {move || {
                    rows()
                        .into_iter()
                        .map(|(label, value)| {
                            view! {
                                <div class="panel__row">
                                    <dt class="panel__label">{label}</dt>
                                    <dd class="panel__value">{value}</dd>
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </dl>
        </section>
    }
}
