use super::*;

#[test]
fn endpoint_joins_base_and_path() {
    assert_eq!(endpoint("/api", "/login"), "/api/login");
}

#[test]
fn endpoint_tolerates_trailing_slash_on_base() {
    assert_eq!(endpoint("https://accounts.example.com/api/", "/user"), "https://accounts.example.com/api/user");
}

#[test]
fn bearer_formats_authorization_value() {
    assert_eq!(bearer("abc123"), "Bearer abc123");
}

#[test]
fn user_role_path_formats_expected_path() {
    assert_eq!(user_role_path("u42"), "/users/u42/role");
}

#[test]
fn status_fallback_message_formats_status() {
    assert_eq!(status_fallback_message(502), "request failed: 502");
}

#[test]
fn default_service_targets_api_mount() {
    assert_eq!(HttpAuthService::default().base, DEFAULT_API_BASE);
}

#[test]
fn api_error_detects_unauthorized() {
    let err = ApiError::Status { status: 401, message: "invalid token".to_owned() };
    assert!(err.is_unauthorized());
    assert!(!ApiError::Unavailable.is_unauthorized());
    assert!(!ApiError::Status { status: 409, message: String::new() }.is_unauthorized());
}

#[test]
fn api_error_display_includes_status_and_message() {
    let err = ApiError::Status { status: 409, message: "email already registered".to_owned() };
    assert_eq!(err.to_string(), "request failed with status 409: email already registered");
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn http_service_is_unavailable_outside_browser() {
    let service = HttpAuthService::default();
    let result = futures::executor::block_on(service.login("a@b.com", "pw"));
    assert_eq!(result, Err(ApiError::Unavailable));
    let result = futures::executor::block_on(service.fetch_profile("t"));
    assert_eq!(result, Err(ApiError::Unavailable));
}
