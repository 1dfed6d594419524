use super::*;

#[test]
fn validate_credentials_trims_email_only() {
    assert_eq!(
        validate_credentials("  user@example.com  ", " secret "),
        Ok(("user@example.com".to_owned(), " secret ".to_owned()))
    );
}

#[test]
fn validate_credentials_requires_both_fields() {
    assert_eq!(validate_credentials("", "pw"), Err(MISSING_CREDENTIALS));
    assert_eq!(validate_credentials("   ", "pw"), Err(MISSING_CREDENTIALS));
    assert_eq!(validate_credentials("a@b.com", ""), Err(MISSING_CREDENTIALS));
}

#[test]
fn validate_credentials_requires_at_sign() {
    assert_eq!(validate_credentials("not-an-email", "pw"), Err(INVALID_EMAIL));
}
