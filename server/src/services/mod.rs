//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own account rules and credential handling so route
//! handlers can stay focused on protocol translation and bearer-token
//! plumbing.

pub mod accounts;
pub mod token;
