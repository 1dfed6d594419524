//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It is
//! a cheap `Arc` handle; all locking happens inside [`AccountDirectory`].

use std::sync::Arc;

use crate::services::accounts::AccountDirectory;

#[derive(Clone, Default)]
pub struct AppState {
    pub accounts: Arc<AccountDirectory>,
}

impl AppState {
    #[must_use]
    pub fn new(accounts: AccountDirectory) -> Self {
        Self { accounts: Arc::new(accounts) }
    }
}

#[cfg(test)]
pub(crate) mod test_helpers {
    use super::*;

    pub const DEMO_PASSWORD: &str = "password";

    /// State with the three demo accounts seeded.
    pub async fn test_app_state() -> AppState {
        let accounts = AccountDirectory::new();
        accounts.seed_demo(DEMO_PASSWORD).await;
        AppState::new(accounts)
    }
}
