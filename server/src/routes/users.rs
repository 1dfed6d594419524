//! Admin-only account management endpoints.

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;

use axum::Json;
use axum::extract::{Path, State};
use client::net::types::{RoleUpdate, UserEnvelope, UserListEnvelope};

use super::ApiFailure;
use super::auth::AuthUser;
use crate::state::AppState;

/// `GET /api/users`
pub async fn list_users(State(state): State<AppState>, auth: AuthUser) -> Result<Json<UserListEnvelope>, ApiFailure> {
    let users = state.accounts.list_profiles(&auth.token).await.map_err(|e| {
        tracing::warn!(user_id = %auth.user.id, error = %e, "user list denied");
        e
    })?;
    Ok(Json(UserListEnvelope { users }))
}

/// `PUT /api/users/{id}/role`
pub async fn update_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<String>,
    Json(body): Json<RoleUpdate>,
) -> Result<Json<UserEnvelope>, ApiFailure> {
    let user = state.accounts.set_role(&auth.token, &user_id, body.role).await.map_err(|e| {
        tracing::warn!(actor = %auth.user.id, target = %user_id, error = %e, "role change rejected");
        e
    })?;
    tracing::info!(actor = %auth.user.id, target = %user.id, role = %user.role, "role changed");
    Ok(Json(UserEnvelope { user }))
}
