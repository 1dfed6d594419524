use super::*;

fn sample_profile() -> UserProfile {
    UserProfile {
        id: "1".to_owned(),
        email: "user1@example.com".to_owned(),
        name: "User One".to_owned(),
        role: Role::User,
        address: Some("123 Main St".to_owned()),
        billing_address: Some("123 Main St".to_owned()),
        phone_number: Some("555-1234".to_owned()),
        location: Some("New York, NY".to_owned()),
        vat_number: None,
    }
}

// =============================================================
// Role
// =============================================================

#[test]
fn role_serializes_lowercase() {
    assert_eq!(serde_json::to_value(Role::Admin).unwrap(), serde_json::json!("admin"));
    assert_eq!(serde_json::to_value(Role::User).unwrap(), serde_json::json!("user"));
}

#[test]
fn role_rejects_unknown_wire_value() {
    let parsed = serde_json::from_value::<Role>(serde_json::json!("superuser"));
    assert!(parsed.is_err());
}

#[test]
fn role_from_str_accepts_known_values() {
    assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
    assert_eq!(" user ".parse::<Role>(), Ok(Role::User));
    assert!("Admin".parse::<Role>().is_err());
}

#[test]
fn role_default_is_user() {
    assert_eq!(Role::default(), Role::User);
    assert!(!Role::default().is_admin());
}

// =============================================================
// UserProfile wire format
// =============================================================

#[test]
fn profile_uses_camel_case_keys_and_omits_missing_fields() {
    let value = serde_json::to_value(sample_profile()).unwrap();
    assert_eq!(value["billingAddress"], "123 Main St");
    assert_eq!(value["phoneNumber"], "555-1234");
    assert_eq!(value["role"], "user");
    assert!(value.get("vatNumber").is_none());
}

#[test]
fn profile_deserializes_without_optional_fields() {
    let json = serde_json::json!({
        "id": "7",
        "email": "a@b.com",
        "name": "a",
        "role": "admin",
    });
    let profile: UserProfile = serde_json::from_value(json).unwrap();
    assert_eq!(profile.role, Role::Admin);
    assert!(profile.address.is_none());
    assert!(profile.vat_number.is_none());
}

// =============================================================
// Patch merging
// =============================================================

#[test]
fn apply_only_touches_supplied_fields() {
    let before = sample_profile();
    let patch = ProfilePatch { phone_number: Some("555-9999".to_owned()), ..ProfilePatch::default() };
    let after = before.merged(&patch);

    assert_eq!(after.phone_number.as_deref(), Some("555-9999"));
    assert_eq!(after.name, before.name);
    assert_eq!(after.email, before.email);
    assert_eq!(after.address, before.address);
    assert_eq!(after.billing_address, before.billing_address);
    assert_eq!(after.location, before.location);
    assert_eq!(after.role, before.role);
    assert_eq!(after.id, before.id);
}

#[test]
fn apply_blank_optional_value_clears_field() {
    let patch = ProfilePatch { address: Some("   ".to_owned()), ..ProfilePatch::default() };
    let after = sample_profile().merged(&patch);
    assert!(after.address.is_none());
}

#[test]
fn apply_trims_values() {
    let patch = ProfilePatch {
        name: Some("  Jane  ".to_owned()),
        vat_number: Some(" DE123 ".to_owned()),
        ..ProfilePatch::default()
    };
    let after = sample_profile().merged(&patch);
    assert_eq!(after.name, "Jane");
    assert_eq!(after.vat_number.as_deref(), Some("DE123"));
}

#[test]
fn empty_patch_is_identity() {
    let patch = ProfilePatch::default();
    assert!(patch.is_empty());
    assert_eq!(sample_profile().merged(&patch), sample_profile());
}

#[test]
fn patch_serializes_only_present_fields() {
    let patch = ProfilePatch { location: Some("Berlin".to_owned()), ..ProfilePatch::default() };
    assert_eq!(serde_json::to_value(&patch).unwrap(), serde_json::json!({ "location": "Berlin" }));
}

#[test]
fn patch_ignores_role_in_payload() {
    let patch: ProfilePatch = serde_json::from_value(serde_json::json!({
        "name": "Mallory",
        "role": "admin",
    }))
    .unwrap();
    assert_eq!(patch.name.as_deref(), Some("Mallory"));
    let after = sample_profile().merged(&patch);
    assert_eq!(after.role, Role::User);
}
