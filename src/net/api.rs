//! Authenticated HTTP client.
//!
//! DESIGN
//! ======
//! Every outbound request gets the persisted access token as a bearer
//! credential. A 401 on a non-auth endpoint triggers one refresh-and-retry;
//! auth endpoints fail directly (a 401 there means bad credentials, and
//! refreshing would recurse). The retry guard is a per-call attempt counter,
//! never shared request state, so calls retried across await points cannot
//! alias each other.
//!
//! TRADE-OFFS
//! ==========
//! Concurrent 401s each run their own refresh. The backend tolerates
//! repeated exchange of a still-valid refresh token, so de-duplication is
//! not worth a cross-request lock on this path.

use std::time::Duration;

use reqwest::Method;
use serde_json::Value;
use uuid::Uuid;

use super::error::{ApiError, classify_response};
use super::types::{
    AuthApi, LoginRequest, LoginSuccess, RegisterOutcome, RegisterRequest, TokenPair, User,
};
use crate::config::ApiConfig;
use crate::store::TokenStore;

pub const LOGIN_PATH: &str = "/auth/login/";
pub const REGISTER_PATH: &str = "/auth/register/";
pub const REFRESH_PATH: &str = "/auth/refresh/";
pub const PROFILE_PATH: &str = "/auth/profile/";

// =============================================================================
// CLIENT
// =============================================================================

pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    store: TokenStore,
}

impl ApiClient {
    /// Build a client over the given config and token store.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn new(config: ApiConfig, store: TokenStore) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;
        Ok(Self { http, config, store })
    }

    /// The token store this client reads bearer credentials from.
    #[must_use]
    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.send(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.send(Method::POST, path, Some(body)).await
    }

    pub async fn patch(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.send(Method::PATCH, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.send(Method::DELETE, path, None).await
    }

    /// Dispatch one request with bearer injection and single-retry recovery.
    ///
    /// # Errors
    ///
    /// Non-2xx responses surface classified; a failed refresh surfaces as
    /// [`ApiError::SessionExpired`] with both token stores already cleared.
    pub async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value, ApiError> {
        let request_id = Uuid::new_v4();
        let mut attempt: u8 = 0;
        loop {
            // Re-read on every attempt so a retry picks up the token the
            // recovery path just persisted.
            let bearer = self.store.access();
            let response = self.dispatch(&method, path, body, bearer.as_deref()).await?;
            let status = response.status().as_u16();
            let text = response
                .text()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;

            if (200..300).contains(&status) {
                tracing::debug!(%request_id, %method, path, status, attempt, "request ok");
                return parse_body(&text);
            }

            let error = classify_response(status, &text);
            if status != 401 || is_auth_endpoint(path) || attempt > 0 {
                return Err(error);
            }

            let Some(refresh) = self.store.refresh() else {
                // Nothing to renew with. Drop the stale access token from
                // both mirrors and surface the original error; navigation
                // is not this layer's call.
                self.store.clear();
                tracing::debug!(%request_id, path, "401 with no refresh token");
                return Err(error);
            };
            match self.exchange_refresh(&refresh).await {
                Ok(access) => {
                    self.store.set_access(&access);
                    tracing::debug!(%request_id, path, "access token refreshed, retrying");
                }
                Err(refresh_error) => {
                    self.store.clear();
                    tracing::warn!(%request_id, error = %refresh_error, "token refresh failed, session ended");
                    return Err(ApiError::SessionExpired);
                }
            }
            attempt += 1;
        }
    }

    async fn dispatch(
        &self,
        method: &Method,
        path: &str,
        body: Option<&Value>,
        bearer: Option<&str>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{}", self.config.base_url, path);
        let mut request = self.http.request(method.clone(), &url);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        if let Some(json) = body {
            request = request.json(json);
        }
        request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))
    }

    /// Exchange the refresh token for a new access token. Goes straight to
    /// the wire: recovery must never re-enter [`ApiClient::send`].
    async fn exchange_refresh(&self, refresh: &str) -> Result<String, ApiError> {
        let body = serde_json::json!({ "refresh": refresh });
        let response = self.dispatch(&Method::POST, REFRESH_PATH, Some(&body), None).await?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if !(200..300).contains(&status) {
            return Err(classify_response(status, &text));
        }
        parse_refresh_body(&parse_body(&text)?)
    }
}

// =============================================================================
// AUTH ENDPOINTS
// =============================================================================

#[async_trait::async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginSuccess, ApiError> {
        let body = serde_json::to_value(credentials).map_err(|e| ApiError::Parse(e.to_string()))?;
        let value = self.send(Method::POST, LOGIN_PATH, Some(&body)).await?;
        parse_login_body(&value)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<RegisterOutcome, ApiError> {
        let body = serde_json::to_value(request).map_err(|e| ApiError::Parse(e.to_string()))?;
        let value = self.send(Method::POST, REGISTER_PATH, Some(&body)).await?;
        parse_register_body(&value)
    }

    async fn fetch_profile(&self) -> Result<User, ApiError> {
        let value = self.send(Method::GET, PROFILE_PATH, None).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Parse(e.to_string()))
    }
}

// =============================================================================
// WIRE SHAPES
// =============================================================================

/// Login/registration token material comes in two shapes: nested
/// `{"tokens": {"access", "refresh"}}` or flat `{"access", "refresh"}`.
#[derive(serde::Deserialize)]
struct LoginWire {
    tokens: Option<TokenPair>,
    access: Option<String>,
    refresh: Option<String>,
    user: Option<User>,
}

impl LoginWire {
    fn token_pair(self) -> (Option<TokenPair>, Option<User>) {
        let pair = match (self.tokens, self.access, self.refresh) {
            (Some(tokens), _, _) => Some(tokens),
            (None, Some(access), Some(refresh)) => Some(TokenPair { access, refresh }),
            _ => None,
        };
        (pair, self.user)
    }
}

#[derive(serde::Deserialize)]
struct RegisterWire {
    #[serde(default)]
    verification_required: bool,
    email: Option<String>,
    message: Option<String>,
    #[serde(flatten)]
    login: LoginWire,
}

#[derive(serde::Deserialize)]
struct RefreshWire {
    access: String,
}

// =============================================================================
// PARSING
// =============================================================================

/// Auth endpoints are exempt from refresh recovery: a 401 there signals bad
/// credentials, not an expired session.
#[must_use]
pub fn is_auth_endpoint(path: &str) -> bool {
    path == "/auth" || path.starts_with("/auth/")
}

fn parse_body(text: &str) -> Result<Value, ApiError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| ApiError::Parse(e.to_string()))
}

pub(crate) fn parse_login_body(value: &Value) -> Result<LoginSuccess, ApiError> {
    let wire: LoginWire = serde_json::from_value(value.clone()).map_err(|e| ApiError::Parse(e.to_string()))?;
    let (tokens, user) = wire.token_pair();
    let tokens = tokens.ok_or_else(|| ApiError::Parse("login response carried no tokens".to_owned()))?;
    let user = user.ok_or_else(|| ApiError::Parse("login response carried no user".to_owned()))?;
    Ok(LoginSuccess { tokens, user })
}

pub(crate) fn parse_register_body(value: &Value) -> Result<RegisterOutcome, ApiError> {
    let wire: RegisterWire = serde_json::from_value(value.clone()).map_err(|e| ApiError::Parse(e.to_string()))?;
    if wire.verification_required {
        return Ok(RegisterOutcome::VerificationRequired {
            email: wire.email.unwrap_or_default(),
            message: wire.message.unwrap_or_default(),
        });
    }
    let (tokens, user) = wire.login.token_pair();
    let tokens = tokens.ok_or_else(|| ApiError::Parse("registration response carried no tokens".to_owned()))?;
    let user = user.ok_or_else(|| ApiError::Parse("registration response carried no user".to_owned()))?;
    Ok(RegisterOutcome::Complete(LoginSuccess { tokens, user }))
}

pub(crate) fn parse_refresh_body(value: &Value) -> Result<String, ApiError> {
    let wire: RefreshWire = serde_json::from_value(value.clone()).map_err(|e| ApiError::Parse(e.to_string()))?;
    Ok(wire.access)
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
