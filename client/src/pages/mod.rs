//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (guards, session calls) and
//! delegates rendering details to `components`.

pub mod admin;
pub mod dashboard;
pub mod login;
pub mod register;
