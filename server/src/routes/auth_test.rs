use axum::extract::FromRequestParts;
use axum::http::Request;

use super::*;
use crate::state::test_helpers::{DEMO_PASSWORD, test_app_state};

fn credentials(email: &str, password: &str) -> Json<Credentials> {
    Json(Credentials { email: email.to_owned(), password: password.to_owned() })
}

async fn extract(state: &AppState, header: Option<&str>) -> Result<AuthUser, ApiFailure> {
    let mut builder = Request::builder().uri("/api/user");
    if let Some(value) = header {
        builder = builder.header(AUTHORIZATION, value);
    }
    let (mut parts, ()) = builder.body(()).unwrap().into_parts();
    AuthUser::from_request_parts(&mut parts, state).await
}

// =============================================================================
// parse_bearer
// =============================================================================

#[test]
fn parse_bearer_accepts_scheme_case_insensitively() {
    assert_eq!(parse_bearer("Bearer abc"), Some("abc"));
    assert_eq!(parse_bearer("bearer  abc "), Some("abc"));
}

#[test]
fn parse_bearer_rejects_other_shapes() {
    assert_eq!(parse_bearer(""), None);
    assert_eq!(parse_bearer("Bearer"), None);
    assert_eq!(parse_bearer("Bearer   "), None);
    assert_eq!(parse_bearer("Basic abc"), None);
}

// =============================================================================
// AuthUser
// =============================================================================

#[tokio::test]
async fn extractor_resolves_valid_token() {
    let state = test_app_state().await;
    let session = state.accounts.login("user1@example.com", DEMO_PASSWORD).await.unwrap();

    let auth = extract(&state, Some(&format!("Bearer {}", session.token))).await.unwrap();

    assert_eq!(auth.user, session.user);
    assert_eq!(auth.token, session.token);
}

#[tokio::test]
async fn extractor_rejects_missing_and_unknown_tokens() {
    let state = test_app_state().await;
    assert_eq!(extract(&state, None).await.err().unwrap().0, AccountError::InvalidToken);
    assert_eq!(extract(&state, Some("Bearer nope")).await.err().unwrap().0, AccountError::InvalidToken);
}

// =============================================================================
// handlers
// =============================================================================

#[tokio::test]
async fn login_returns_token_and_profile() {
    let state = test_app_state().await;
    let Json(session) = login(State(state.clone()), credentials("user2@example.com", DEMO_PASSWORD))
        .await
        .unwrap();
    assert_eq!(session.user.email, "user2@example.com");
    assert!(session.user.role.is_admin());
    assert_eq!(state.accounts.profile(&session.token).await.unwrap(), session.user);
}

#[tokio::test]
async fn login_with_wrong_password_is_invalid_credentials() {
    let state = test_app_state().await;
    let err = login(State(state), credentials("user1@example.com", "wrong")).await.unwrap_err();
    assert_eq!(err.0, AccountError::InvalidCredentials);
}

#[tokio::test]
async fn register_answers_created() {
    let state = test_app_state().await;
    let (status, Json(session)) = register(State(state), credentials("new@example.com", "pw")).await.unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(session.user.name, "new");
}

#[tokio::test]
async fn register_existing_email_conflicts() {
    let state = test_app_state().await;
    let err = register(State(state), credentials("user3@example.com", "pw")).await.unwrap_err();
    assert_eq!(err.0, AccountError::EmailTaken);
}

#[tokio::test]
async fn me_echoes_extracted_user() {
    let state = test_app_state().await;
    let session = state.accounts.login("user1@example.com", DEMO_PASSWORD).await.unwrap();
    let auth = AuthUser { user: session.user.clone(), token: session.token };
    let Json(body) = me(auth).await;
    assert_eq!(body.user, session.user);
}

#[tokio::test]
async fn update_me_applies_patch() {
    let state = test_app_state().await;
    let session = state.accounts.login("user1@example.com", DEMO_PASSWORD).await.unwrap();
    let auth = AuthUser { user: session.user, token: session.token.clone() };
    let patch = ProfilePatch { name: Some("Renamed".to_owned()), ..ProfilePatch::default() };

    let Json(body) = update_me(State(state.clone()), auth, Json(patch)).await.unwrap();

    assert_eq!(body.user.name, "Renamed");
    assert_eq!(state.accounts.profile(&session.token).await.unwrap().name, "Renamed");
}

#[tokio::test]
async fn update_me_rejects_blank_name() {
    let state = test_app_state().await;
    let session = state.accounts.login("user1@example.com", DEMO_PASSWORD).await.unwrap();
    let auth = AuthUser { user: session.user, token: session.token };
    let patch = ProfilePatch { name: Some(String::new()), ..ProfilePatch::default() };

    let err = update_me(State(state), auth, Json(patch)).await.unwrap_err();
    assert_eq!(err.0, AccountError::InvalidField("name"));
}
