//! Dual-mirror token store facade.

use std::sync::Arc;

use super::backend::{MemoryStore, StorageBackend};
use super::cookie::CookieMirror;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Single write path for session tokens.
///
/// The access token is mirrored into both the script-readable store and the
/// cookie store on every write; the refresh token lives only in the
/// script-readable store (it is never sent with requests and the middleware
/// has no use for it). All transitions go through here so the two mirrors
/// cannot drift.
#[derive(Clone)]
pub struct TokenStore {
    local: Arc<dyn StorageBackend>,
    cookies: Arc<dyn StorageBackend>,
}

impl TokenStore {
    #[must_use]
    pub fn new(local: Arc<dyn StorageBackend>, cookies: Arc<dyn StorageBackend>) -> Self {
        Self { local, cookies }
    }

    /// Store backed by two in-memory maps. Used by tests and native hosts
    /// with no middleware to feed.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), Arc::new(MemoryStore::new()))
    }

    /// Store with a real cookie jar as the second mirror.
    #[must_use]
    pub fn with_cookie_mirror(secure: bool) -> Self {
        Self::new(Arc::new(MemoryStore::new()), Arc::new(CookieMirror::new(secure)))
    }

    /// Persist a full token pair. Called on login, registration with direct
    /// tokens, and out-of-band verification.
    pub fn set_tokens(&self, access: &str, refresh: &str) {
        self.local.set(ACCESS_TOKEN_KEY, access);
        self.local.set(REFRESH_TOKEN_KEY, refresh);
        self.cookies.set(ACCESS_TOKEN_KEY, access);
    }

    /// Replace only the access token, keeping the refresh token. Called by
    /// the HTTP client after a successful refresh.
    pub fn set_access(&self, access: &str) {
        self.local.set(ACCESS_TOKEN_KEY, access);
        self.cookies.set(ACCESS_TOKEN_KEY, access);
    }

    #[must_use]
    pub fn access(&self) -> Option<String> {
        self.local.get(ACCESS_TOKEN_KEY)
    }

    #[must_use]
    pub fn refresh(&self) -> Option<String> {
        self.local.get(REFRESH_TOKEN_KEY)
    }

    /// The cookie mirror's view of the access token.
    #[must_use]
    pub fn mirrored_access(&self) -> Option<String> {
        self.cookies.get(ACCESS_TOKEN_KEY)
    }

    /// Remove everything from both mirrors. Called on logout and on
    /// irrecoverable refresh failure.
    pub fn clear(&self) {
        self.local.remove(ACCESS_TOKEN_KEY);
        self.local.remove(REFRESH_TOKEN_KEY);
        self.cookies.remove(ACCESS_TOKEN_KEY);
    }
}

#[cfg(test)]
#[path = "tokens_test.rs"]
mod tests;
