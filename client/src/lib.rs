//! # client
//!
//! Leptos + WASM frontend for the account portal: sign-in, registration, the
//! user and admin dashboards, and the settings editor.
//!
//! The session state machine lives in [`state::session`]; views reach it via
//! Leptos context and observe it through the `RwSignal<AuthState>` bridge set
//! up in [`app::App`].

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: install logging and hydrate the server-rendered app.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
