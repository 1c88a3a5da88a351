//! Wire and domain types shared by the transport and session layers.

use serde::{Deserialize, Serialize};

use super::error::ApiError;

// =============================================================================
// TOKENS
// =============================================================================

/// Opaque bearer token pair issued by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token, sent as the bearer credential.
    pub access: String,
    /// Long-lived refresh token, exchanged for new access tokens.
    pub refresh: String,
}

// =============================================================================
// USER
// =============================================================================

/// Marketplace account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Posts jobs and accepts bids.
    Client,
    /// Bids on jobs and gets paid.
    Worker,
    Admin,
}

/// Server-owned user profile mirrored into session state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub role: UserRole,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

impl User {
    /// Display name assembled from the name fields, falling back to email.
    #[must_use]
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() { self.email.clone() } else { full.to_owned() }
    }
}

// =============================================================================
// REQUESTS
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

// =============================================================================
// OUTCOMES
// =============================================================================

/// Normalized successful login: tokens plus the profile that came with them.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginSuccess {
    pub tokens: TokenPair,
    pub user: User,
}

/// Result of a registration call.
#[derive(Debug, Clone, PartialEq)]
pub enum RegisterOutcome {
    /// The server wants the email verified before issuing tokens. Returned
    /// to the caller as-is so it can render the check-your-email screen.
    VerificationRequired { email: String, message: String },
    /// The server issued tokens directly (e.g. social registration).
    Complete(LoginSuccess),
}

// =============================================================================
// AUTH API SEAM
// =============================================================================

/// Authentication endpoints as the session layer sees them.
///
/// [`crate::net::ApiClient`] is the production implementation; session tests
/// substitute scripted mocks.
#[async_trait::async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginSuccess, ApiError>;
    async fn register(&self, request: &RegisterRequest) -> Result<RegisterOutcome, ApiError>;
    async fn fetch_profile(&self) -> Result<User, ApiError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
