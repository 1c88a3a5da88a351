use super::*;

// =============================================================================
// is_auth_page
// =============================================================================

#[test]
fn auth_flow_pages_are_auth_pages() {
    assert!(is_auth_page("/login"));
    assert!(is_auth_page("/register"));
    assert!(is_auth_page("/verify-email"));
    assert!(is_auth_page("/forgot-password"));
    assert!(is_auth_page("/reset-password"));
}

#[test]
fn trailing_slash_and_query_are_ignored() {
    assert!(is_auth_page("/login/"));
    assert!(is_auth_page("/login?next=/jobs"));
    assert!(is_auth_page("/reset-password?token=abc#form"));
}

#[test]
fn nested_auth_segments_count() {
    assert!(is_auth_page("/register/worker"));
    assert!(is_auth_page("/verify-email/12345"));
}

#[test]
fn protected_pages_are_not_auth_pages() {
    assert!(!is_auth_page("/"));
    assert!(!is_auth_page("/jobs"));
    assert!(!is_auth_page("/dashboard/payments"));
}

#[test]
fn prefix_without_segment_boundary_does_not_match() {
    assert!(!is_auth_page("/login-help"));
    assert!(!is_auth_page("/registered"));
}

// =============================================================================
// after_session_expired
// =============================================================================

#[test]
fn expiry_on_protected_page_goes_to_login() {
    assert_eq!(after_session_expired("/jobs"), Some(Navigation::Login));
    assert_eq!(after_session_expired("/dashboard/payments"), Some(Navigation::Login));
}

#[test]
fn expiry_on_auth_pages_is_suppressed() {
    assert_eq!(after_session_expired("/login"), None);
    assert_eq!(after_session_expired("/register?step=2"), None);
    assert_eq!(after_session_expired("/verify-email/xyz"), None);
}

#[test]
fn expiry_on_landing_page_is_suppressed() {
    assert_eq!(after_session_expired("/"), None);
    assert_eq!(after_session_expired(""), None);
}

// =============================================================================
// Navigation
// =============================================================================

#[test]
fn navigation_paths() {
    assert_eq!(Navigation::Login.path(), "/login");
    assert_eq!(Navigation::Landing.path(), "/");
}
