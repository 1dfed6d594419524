//! Credential and profile endpoints.
//!
//! DESIGN
//! ======
//! Sessions travel as `Authorization: Bearer <token>`. [`AuthUser`] resolves
//! the header to a profile before any handler that needs one runs, so the
//! handlers themselves only translate JSON to account-directory calls.

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

use axum::Json;
use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use client::net::types::{AuthResponse, Credentials, ProfilePatch, UserEnvelope, UserProfile};

use super::ApiFailure;
use crate::services::accounts::AccountError;
use crate::state::AppState;

/// Extract the token from an `Authorization` header value.
pub(crate) fn parse_bearer(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Authenticated user resolved from the bearer token.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: UserProfile,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiFailure;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_bearer)
            .ok_or(AccountError::InvalidToken)?
            .to_owned();

        let app_state = AppState::from_ref(state);
        let user = app_state.accounts.profile(&token).await?;
        Ok(Self { user, token })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/login`
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<Credentials>,
) -> Result<Json<AuthResponse>, ApiFailure> {
    let session = state.accounts.login(&body.email, &body.password).await.map_err(|e| {
        tracing::info!(error = %e, "login rejected");
        e
    })?;
    tracing::info!(user_id = %session.user.id, "login");
    Ok(Json(session))
}

/// `POST /api/register`
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<Credentials>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiFailure> {
    let session = state.accounts.register(&body.email, &body.password).await.map_err(|e| {
        tracing::info!(error = %e, "registration rejected");
        e
    })?;
    tracing::info!(user_id = %session.user.id, "account registered");
    Ok((StatusCode::CREATED, Json(session)))
}

/// `GET /api/user`
pub async fn me(auth: AuthUser) -> Json<UserEnvelope> {
    Json(UserEnvelope { user: auth.user })
}

/// `PUT /api/user`
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(patch): Json<ProfilePatch>,
) -> Result<Json<UserEnvelope>, ApiFailure> {
    let user = state.accounts.update_profile(&auth.token, &patch).await.map_err(|e| {
        tracing::warn!(user_id = %auth.user.id, error = %e, "profile update rejected");
        e
    })?;
    tracing::info!(user_id = %user.id, "profile updated");
    Ok(Json(UserEnvelope { user }))
}
