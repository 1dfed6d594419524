//! Reusable view components shared by the pages.

pub mod account_panel;
pub mod user_settings;
