use super::*;
use crate::net::types::Role;

fn profile() -> UserProfile {
    UserProfile {
        id: "1".to_owned(),
        email: "user1@example.com".to_owned(),
        name: "User One".to_owned(),
        role: Role::User,
        address: Some("123 Main St".to_owned()),
        billing_address: None,
        phone_number: None,
        location: None,
        vat_number: None,
    }
}

#[test]
fn account_rows_lists_summary_fields_in_order() {
    let rows = account_rows(&profile());
    let labels: Vec<_> = rows.iter().map(|(label, _)| *label).collect();
    assert_eq!(labels, ["Full name", "Email address", "Phone number", "Address"]);
    assert_eq!(rows[0].1, "User One");
    assert_eq!(rows[3].1, "123 Main St");
}

#[test]
fn account_rows_shows_placeholder_for_missing_values() {
    let rows = account_rows(&profile());
    assert_eq!(rows[2].1, EMPTY_VALUE);
}
