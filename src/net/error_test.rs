use super::*;

// =============================================================================
// classify_response — detail shape
// =============================================================================

#[test]
fn detail_body_classifies_as_rejected() {
    let err = classify_response(401, r#"{"detail": "Invalid email or password."}"#);
    match err {
        ApiError::Rejected { status, detail } => {
            assert_eq!(status, 401);
            assert_eq!(detail, "Invalid email or password.");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[test]
fn rejected_display_is_the_detail() {
    let err = classify_response(401, r#"{"detail": "Token is invalid or expired"}"#);
    assert_eq!(err.to_string(), "Token is invalid or expired");
    assert_eq!(err.display_message(), "Token is invalid or expired");
}

// =============================================================================
// classify_response — field-keyed shape
// =============================================================================

#[test]
fn field_lists_classify_as_validation() {
    let body = r#"{"email": ["user with this email already exists."], "password": ["This password is too short."]}"#;
    let err = classify_response(400, body);
    let ApiError::Validation { status, fields } = err else {
        panic!("expected Validation");
    };
    assert_eq!(status, 400);
    assert_eq!(fields.len(), 2);
    assert!(
        fields
            .iter()
            .any(|f| f.field == "email" && f.message.contains("already exists"))
    );
}

#[test]
fn non_field_errors_render_bare() {
    let err = classify_response(400, r#"{"non_field_errors": ["Passwords do not match."]}"#);
    assert_eq!(err.display_message(), "Passwords do not match.");
}

#[test]
fn field_errors_render_prefixed() {
    let err = classify_response(400, r#"{"password": ["This password is too short."]}"#);
    assert_eq!(err.display_message(), "password: This password is too short.");
}

#[test]
fn bare_string_field_value_is_accepted() {
    let err = classify_response(400, r#"{"email": "invalid address"}"#);
    let ApiError::Validation { fields, .. } = err else {
        panic!("expected Validation");
    };
    assert_eq!(fields[0].message, "invalid address");
}

// =============================================================================
// classify_response — fallthrough
// =============================================================================

#[test]
fn non_json_body_classifies_as_http() {
    let err = classify_response(502, "<html>bad gateway</html>");
    let ApiError::Http { status, body } = err else {
        panic!("expected Http");
    };
    assert_eq!(status, 502);
    assert!(body.contains("bad gateway"));
}

#[test]
fn json_without_messages_classifies_as_http() {
    let err = classify_response(500, r#"{"code": 500}"#);
    assert!(matches!(err, ApiError::Http { status: 500, .. }));
}

#[test]
fn detail_wins_over_field_lists() {
    let err = classify_response(403, r#"{"detail": "Forbidden", "email": ["ignored"]}"#);
    assert!(matches!(err, ApiError::Rejected { .. }));
}

// =============================================================================
// display_message — non-response variants
// =============================================================================

#[test]
fn transport_display_is_generic() {
    let err = ApiError::Transport("connection refused".to_owned());
    assert_eq!(err.display_message(), "network error, check your connection");
    assert!(err.to_string().contains("connection refused"));
}

#[test]
fn session_expired_display() {
    let msg = ApiError::SessionExpired.display_message();
    assert!(msg.contains("session"));
    assert!(msg.contains("sign in"));
}

// =============================================================================
// status
// =============================================================================

#[test]
fn status_present_only_on_response_variants() {
    assert_eq!(classify_response(401, r#"{"detail": "x"}"#).status(), Some(401));
    assert_eq!(ApiError::SessionExpired.status(), None);
    assert_eq!(ApiError::Transport("t".to_owned()).status(), None);
}
