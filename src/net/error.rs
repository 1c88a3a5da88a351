//! Transport error taxonomy and response-body classification.
//!
//! The backend reports failures Django-style: `{"detail": "..."}` for
//! credential-class rejections, field-keyed message lists for validation
//! failures. Classification is pure so it can be tested without I/O.

use serde_json::Value;

/// One field-level validation message, e.g. `email: already registered`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Errors produced by [`crate::net::ApiClient`] operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server rejected the request with a `detail` message (bad
    /// credentials, bad refresh token, missing permissions). Never retried.
    #[error("{detail}")]
    Rejected { status: u16, detail: String },

    /// Field-keyed validation failure, mapped for form display.
    #[error("validation failed")]
    Validation { status: u16, fields: Vec<FieldError> },

    /// Any other non-2xx response, surfaced unchanged.
    #[error("server returned HTTP {status}")]
    Http { status: u16, body: String },

    /// The request never produced a response (DNS, connect, timeout).
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body could not be decoded into the expected shape.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),

    /// A refresh attempt failed and both token stores were cleared. This is
    /// a signal for the caller to navigate to login, not a transport fault;
    /// the suppression rule lives in [`crate::state::nav`].
    #[error("session expired, sign in again")]
    SessionExpired,
}

impl ApiError {
    /// One human-readable line for the session state's `error` field.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::Rejected { detail, .. } => detail.clone(),
            Self::Validation { fields, .. } => {
                // non_field_errors reads best bare; everything else is
                // prefixed with its form field.
                let rendered: Vec<String> = fields
                    .iter()
                    .map(|f| {
                        if f.field == "non_field_errors" {
                            f.message.clone()
                        } else {
                            format!("{}: {}", f.field, f.message)
                        }
                    })
                    .collect();
                if rendered.is_empty() {
                    "validation failed".to_owned()
                } else {
                    rendered.join("; ")
                }
            }
            Self::Http { status, .. } => format!("server error ({status})"),
            Self::Transport(_) => "network error, check your connection".to_owned(),
            Self::Parse(_) => "unexpected server response".to_owned(),
            Self::ClientBuild(msg) => msg.clone(),
            Self::SessionExpired => "your session has expired, sign in again".to_owned(),
        }
    }

    /// HTTP status carried by response-class variants.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } | Self::Validation { status, .. } | Self::Http { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

/// Classify a non-2xx response body into the error taxonomy.
#[must_use]
pub(crate) fn classify_response(status: u16, body: &str) -> ApiError {
    let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) else {
        return ApiError::Http { status, body: body.to_owned() };
    };

    if let Some(detail) = map.get("detail").and_then(Value::as_str) {
        return ApiError::Rejected { status, detail: detail.to_owned() };
    }

    let fields: Vec<FieldError> = map
        .iter()
        .filter_map(|(field, value)| {
            first_message(value).map(|message| FieldError { field: field.clone(), message })
        })
        .collect();
    if fields.is_empty() {
        ApiError::Http { status, body: body.to_owned() }
    } else {
        ApiError::Validation { status, fields }
    }
}

/// First message out of a Django-style error value (list of strings, or a
/// bare string).
fn first_message(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(|v| v.as_str().map(str::to_owned)),
        _ => None,
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
