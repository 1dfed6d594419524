//! Router assembly and HTTP error mapping.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON account API under `/api` and stitches it with
//! Leptos SSR rendering under a single Axum router. Every API failure leaves
//! through [`ApiFailure`], so the browser always gets `{"error": "..."}` with a
//! status derived from the [`AccountError`] variant.

pub mod auth;
pub mod users;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use client::net::types::ErrorBody;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::services::accounts::AccountError;
use crate::state::AppState;

/// JSON account API plus the health probe.
pub fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/login", post(auth::login))
        .route("/api/register", post(auth::register))
        .route("/api/user", get(auth::me).put(auth::update_me))
        .route("/api/users", get(users::list_users))
        .route("/api/users/{id}/role", put(users::update_role))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API routes + Leptos SSR + `/pkg` static assets.
///
/// `site_root` overrides the directory `/pkg` is served from; by default it
/// comes from the Leptos configuration.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[workspace.metadata.leptos]` section).
pub fn leptos_app(state: AppState, site_root: Option<PathBuf>) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = site_root.unwrap_or_else(|| PathBuf::from(leptos_options.site_root.as_ref()));

    Ok(api_routes(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg"))))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

pub(crate) fn account_error_to_status(err: &AccountError) -> StatusCode {
    match err {
        AccountError::InvalidEmail | AccountError::InvalidPassword | AccountError::InvalidField(_) => {
            StatusCode::BAD_REQUEST
        }
        AccountError::InvalidCredentials | AccountError::InvalidToken => StatusCode::UNAUTHORIZED,
        AccountError::EmailTaken => StatusCode::CONFLICT,
        AccountError::Forbidden => StatusCode::FORBIDDEN,
        AccountError::NotFound(_) => StatusCode::NOT_FOUND,
    }
}

/// Error response of every API handler.
#[derive(Debug)]
pub struct ApiFailure(pub AccountError);

impl From<AccountError> for ApiFailure {
    fn from(err: AccountError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let status = account_error_to_status(&self.0);
        (status, Json(ErrorBody { error: self.0.to_string() })).into_response()
    }
}
