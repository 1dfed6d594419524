//! REST client for the account API.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): every call fails with [`ApiError::Unavailable`] since
//! the session lives in the browser tab, not on the rendering server.
//!
//! ERROR HANDLING
//! ==============
//! Calls return [`ApiError`] carrying the HTTP status and the server's error
//! message. Nothing here retries; the session layer decides what a failure
//! means for the user.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;

use super::types::{AuthResponse, ProfilePatch, Role, UserProfile};
#[cfg(feature = "hydrate")]
use super::types::{Credentials, ErrorBody, RoleUpdate, UserEnvelope, UserListEnvelope};

/// Default mount point of the account API.
pub const DEFAULT_API_BASE: &str = "/api";

/// Transport-level failure talking to the account API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// True when the backend refused the credential (HTTP 401).
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }
}

/// Backend operations the session layer depends on.
///
/// `?Send` because browser futures (`gloo-net`) are not `Send`; the app runs
/// them with `spawn_local` on the single UI thread.
#[async_trait(?Send)]
pub trait AuthService {
    /// Exchange credentials for a session token and profile.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] when the credentials are rejected or the
    /// request fails.
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError>;

    /// Create an account and sign into it.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on conflict, invalid input, or transport failure.
    async fn register(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError>;

    /// Resolve a session token to the account's profile.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] when the token is unknown or the request fails.
    async fn fetch_profile(&self, token: &str) -> Result<UserProfile, ApiError>;

    /// Apply a partial profile update and return the stored result.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] when the update is rejected or the request fails.
    async fn update_profile(&self, token: &str, patch: &ProfilePatch) -> Result<UserProfile, ApiError>;
}

#[cfg(any(test, feature = "hydrate"))]
fn endpoint(base: &str, path: &str) -> String {
    format!("{}{path}", base.trim_end_matches('/'))
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

#[cfg(any(test, feature = "hydrate"))]
fn user_role_path(user_id: &str) -> String {
    format!("/users/{user_id}/role")
}

/// Fallback message when an error response has no JSON body.
#[cfg(any(test, feature = "hydrate"))]
fn status_fallback_message(status: u16) -> String {
    format!("request failed: {status}")
}

/// HTTP implementation of [`AuthService`] against the account API.
#[derive(Clone, Debug)]
pub struct HttpAuthService {
    base: String,
}

impl Default for HttpAuthService {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl HttpAuthService {
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// List every account (admin only) via `GET /users`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the caller is not an admin or the request fails.
    pub async fn list_users(&self, token: &str) -> Result<Vec<UserProfile>, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::get(&endpoint(&self.base, "/users"))
                .header("Authorization", &bearer(token))
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            let body: UserListEnvelope = decode(resp).await?;
            Ok(body.users)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = token;
            Err(ApiError::Unavailable)
        }
    }

    /// Change an account's role (admin only) via `PUT /users/{id}/role`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the caller is not an admin, the account does
    /// not exist, or the request fails.
    pub async fn update_role(&self, token: &str, user_id: &str, role: Role) -> Result<UserProfile, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::put(&endpoint(&self.base, &user_role_path(user_id)))
                .header("Authorization", &bearer(token))
                .json(&RoleUpdate { role })
                .map_err(|e| ApiError::Network(e.to_string()))?
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            let body: UserEnvelope = decode(resp).await?;
            Ok(body.user)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (token, user_id, role);
            Err(ApiError::Unavailable)
        }
    }

    #[cfg(feature = "hydrate")]
    async fn post_credentials(&self, path: &str, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let payload = Credentials { email: email.to_owned(), password: password.to_owned() };
        let resp = gloo_net::http::Request::post(&endpoint(&self.base, path))
            .json(&payload)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(resp).await
    }
}

#[cfg(feature = "hydrate")]
async fn decode<T: serde::de::DeserializeOwned>(resp: gloo_net::http::Response) -> Result<T, ApiError> {
    if !resp.ok() {
        let status = resp.status();
        let message = resp
            .json::<ErrorBody>()
            .await
            .map_or_else(|_| status_fallback_message(status), |body| body.error);
        return Err(ApiError::Status { status, message });
    }
    resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl AuthService for HttpAuthService {
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            self.post_credentials("/login", email, password).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password);
            Err(ApiError::Unavailable)
        }
    }

    async fn register(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            self.post_credentials("/register", email, password).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password);
            Err(ApiError::Unavailable)
        }
    }

    async fn fetch_profile(&self, token: &str) -> Result<UserProfile, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::get(&endpoint(&self.base, "/user"))
                .header("Authorization", &bearer(token))
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            let body: UserEnvelope = decode(resp).await?;
            Ok(body.user)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = token;
            Err(ApiError::Unavailable)
        }
    }

    async fn update_profile(&self, token: &str, patch: &ProfilePatch) -> Result<UserProfile, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::put(&endpoint(&self.base, "/user"))
                .header("Authorization", &bearer(token))
                .json(patch)
                .map_err(|e| ApiError::Network(e.to_string()))?
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            let body: UserEnvelope = decode(resp).await?;
            Ok(body.user)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (token, patch);
            Err(ApiError::Unavailable)
        }
    }
}
