//! Persisted session token storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session token is the only state that survives a reload. The browser
//! keeps it in `localStorage` under [`TOKEN_KEY`]; on the rendering server
//! the same store is a no-op, so SSR always starts signed out.
//!
//! TRADE-OFFS
//! ==========
//! Storage access is best-effort: a browser that denies `localStorage`
//! behaves like an empty store rather than failing the session flow.

#[cfg(test)]
#[path = "session_store_test.rs"]
mod session_store_test;

#[cfg(test)]
use std::sync::{Arc, Mutex, PoisonError};

/// `localStorage` key holding the session token.
pub const TOKEN_KEY: &str = "token";

/// Durable home for the opaque session token. Contents are never validated.
pub trait SessionStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// Browser `localStorage` store. No-op outside the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl SessionStore for LocalStorageStore {
    fn load(&self) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(TOKEN_KEY).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    fn save(&self, token: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                if storage.set_item(TOKEN_KEY, token).is_err() {
                    log::warn!("failed to persist session token");
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = token;
        }
    }

    fn clear(&self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(TOKEN_KEY);
            }
        }
    }
}

/// In-process store shared between clones.
#[cfg(test)]
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    token: Arc<Mutex<Option<String>>>,
}

#[cfg(test)]
impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `token`, as if left behind by an earlier visit.
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.save(token);
        store
    }
}

#[cfg(test)]
impl SessionStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.token.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn save(&self, token: &str) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
    }

    fn clear(&self) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
