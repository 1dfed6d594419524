use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn empty_environment_yields_defaults() {
    let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config, ServerConfig::default());
    assert_eq!(config.port, 3000);
    assert!(config.seed_demo_accounts);
    assert_eq!(config.demo_password, "password");
    assert_eq!(config.site_root, None);
}

#[test]
fn all_keys_are_read() {
    let config = ServerConfig::from_lookup(lookup(&[
        ("PORT", "8080"),
        ("SEED_DEMO_ACCOUNTS", "off"),
        ("DEMO_PASSWORD", "hunter2"),
        ("SITE_ROOT", " target/site "),
    ]))
    .unwrap();
    assert_eq!(config.port, 8080);
    assert!(!config.seed_demo_accounts);
    assert_eq!(config.demo_password, "hunter2");
    assert_eq!(config.site_root, Some(PathBuf::from("target/site")));
}

#[test]
fn bad_port_is_rejected() {
    let err = ServerConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
    assert_eq!(err, ConfigError::Invalid { key: "PORT", value: "eighty".to_owned() });
}

#[test]
fn bad_bool_is_rejected() {
    let err = ServerConfig::from_lookup(lookup(&[("SEED_DEMO_ACCOUNTS", "maybe")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key: "SEED_DEMO_ACCOUNTS", .. }));
}

#[test]
fn empty_demo_password_is_rejected() {
    let err = ServerConfig::from_lookup(lookup(&[("DEMO_PASSWORD", "")])).unwrap_err();
    assert_eq!(err, ConfigError::Empty("DEMO_PASSWORD"));
}

#[test]
fn blank_site_root_is_ignored() {
    let config = ServerConfig::from_lookup(lookup(&[("SITE_ROOT", "  ")])).unwrap();
    assert_eq!(config.site_root, None);
}

#[test]
fn parse_bool_accepts_common_spellings() {
    for raw in ["1", "true", "YES", " on "] {
        assert_eq!(parse_bool(raw), Some(true), "{raw}");
    }
    for raw in ["0", "False", "no", "OFF"] {
        assert_eq!(parse_bool(raw), Some(false), "{raw}");
    }
    assert_eq!(parse_bool("2"), None);
    assert_eq!(parse_bool(""), None);
}
