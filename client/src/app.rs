//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::net::api::HttpAuthService;
use crate::pages::{admin::AdminDashboardPage, dashboard::DashboardPage, login::LoginPage, register::RegisterPage};
use crate::state::auth::AuthState;
use crate::state::session::SessionContext;
use crate::util::auth::DASHBOARD_PATH;
use crate::util::session_store::LocalStorageStore;

/// Session context as wired in the browser app.
pub type AppSession = SessionContext<HttpAuthService, LocalStorageStore>;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Builds the session context, bridges it into `RwSignal<AuthState>`, kicks
/// off the startup token restore, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::restoring());
    let session: AppSession = SessionContext::new(HttpAuthService::default(), LocalStorageStore);
    let subscription = session.subscribe(move |state| {
        let _ = auth.try_update(|a| a.session = state.clone());
    });
    let owner = session.clone();
    on_cleanup(move || owner.unsubscribe(subscription));

    provide_context(auth);
    provide_context(session.clone());

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        if let Err(e) = session.restore().await {
            log::info!("starting signed out: {e}");
        }
        auth.update(|a| a.loading = false);
    });
    #[cfg(not(feature = "hydrate"))]
    drop(session);

    view! {
        <Stylesheet id="leptos" href="/pkg/portal.css"/>
        <Title text="Account Portal"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("register") view=RegisterPage/>
                <Route path=StaticSegment("dashboard") view=DashboardPage/>
                <Route path=StaticSegment("admin") view=AdminDashboardPage/>
                <Route path=StaticSegment("") view=|| view! { <Redirect path=DASHBOARD_PATH/> }/>
            </Routes>
        </Router>
    }
}
