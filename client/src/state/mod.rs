//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `session` owns the authentication state machine; `auth` is the reactive
//! view of it that components subscribe to.

pub mod auth;
pub mod session;
