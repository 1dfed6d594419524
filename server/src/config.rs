//! Process configuration read from the environment.
//!
//! DESIGN
//! ======
//! Everything is read once in `main` into a plain [`ServerConfig`]. Parsing
//! goes through a key lookup function so tests can feed a map instead of
//! mutating the process environment.
//!
//! ERROR HANDLING
//! ==============
//! Unset keys fall back to defaults. Set-but-unparseable keys are a
//! [`ConfigError`]; a typo in `PORT` should stop startup, not silently bind
//! somewhere else.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DEMO_PASSWORD: &str = "password";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Insert the canned demo accounts at startup.
    pub seed_demo_accounts: bool,
    pub demo_password: String,
    /// Overrides the directory `/pkg` assets are served from.
    pub site_root: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            seed_demo_accounts: true,
            demo_password: DEFAULT_DEMO_PASSWORD.to_owned(),
            site_root: None,
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a set variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value: raw })?,
            None => defaults.port,
        };

        let seed_demo_accounts = match lookup("SEED_DEMO_ACCOUNTS") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid { key: "SEED_DEMO_ACCOUNTS", value: raw })?,
            None => defaults.seed_demo_accounts,
        };

        let demo_password = match lookup("DEMO_PASSWORD") {
            Some(raw) if raw.is_empty() => return Err(ConfigError::Empty("DEMO_PASSWORD")),
            Some(raw) => raw,
            None => defaults.demo_password,
        };

        let site_root = lookup("SITE_ROOT")
            .map(|raw| raw.trim().to_owned())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);

        Ok(Self { port, seed_demo_accounts, demo_password, site_root })
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
