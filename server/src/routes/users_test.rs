use client::net::types::Role;

use super::*;
use crate::services::accounts::AccountError;
use crate::state::test_helpers::{DEMO_PASSWORD, test_app_state};

async fn auth_as(state: &AppState, email: &str) -> AuthUser {
    let session = state.accounts.login(email, DEMO_PASSWORD).await.unwrap();
    AuthUser { user: session.user, token: session.token }
}

#[tokio::test]
async fn admin_lists_every_account() {
    let state = test_app_state().await;
    let auth = auth_as(&state, "user2@example.com").await;
    let Json(body) = list_users(State(state), auth).await.unwrap();
    assert_eq!(body.users.len(), 3);
}

#[tokio::test]
async fn plain_user_listing_is_forbidden() {
    let state = test_app_state().await;
    let auth = auth_as(&state, "user1@example.com").await;
    let err = list_users(State(state), auth).await.unwrap_err();
    assert_eq!(err.0, AccountError::Forbidden);
}

#[tokio::test]
async fn admin_promotes_user() {
    let state = test_app_state().await;
    let auth = auth_as(&state, "user2@example.com").await;
    let Json(body) = update_role(State(state.clone()), auth, Path("1".to_owned()), Json(RoleUpdate { role: Role::Admin }))
        .await
        .unwrap();
    assert_eq!(body.user.id, "1");
    assert_eq!(body.user.role, Role::Admin);
}

#[tokio::test]
async fn role_change_for_unknown_id_is_not_found() {
    let state = test_app_state().await;
    let auth = auth_as(&state, "user2@example.com").await;
    let err = update_role(State(state), auth, Path("42".to_owned()), Json(RoleUpdate { role: Role::User }))
        .await
        .unwrap_err();
    assert_eq!(err.0, AccountError::NotFound("42".to_owned()));
}

#[tokio::test]
async fn plain_user_cannot_change_roles() {
    let state = test_app_state().await;
    let auth = auth_as(&state, "user3@example.com").await;
    let err = update_role(State(state), auth, Path("3".to_owned()), Json(RoleUpdate { role: Role::Admin }))
        .await
        .unwrap_err();
    assert_eq!(err.0, AccountError::Forbidden);
}
