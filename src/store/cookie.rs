//! Cookie-store backend.
//!
//! The access token is mirrored into a cookie scoped to the whole site so
//! the edge routing middleware (which sees only request cookies) observes
//! the same auth state as the application.

use std::sync::Mutex;

use cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use super::backend::StorageBackend;

/// Upper bound on how long a token cookie outlives its last write. The
/// middleware only needs it while the app is in use; the backend enforces
/// real token expiry.
const COOKIE_MAX_AGE_DAYS: i64 = 7;

/// Cookie jar holding the middleware-visible token mirror.
///
/// Cookies are written with path `/` and `SameSite=Lax`. The secure flag
/// comes from [`crate::config::ApiConfig::cookie_secure`].
pub struct CookieMirror {
    jar: Mutex<CookieJar>,
    secure: bool,
}

impl CookieMirror {
    #[must_use]
    pub fn new(secure: bool) -> Self {
        Self { jar: Mutex::new(CookieJar::new()), secure }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CookieJar> {
        self.jar
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Render the current cookies as a `Cookie:` request header value, the
    /// view the routing middleware gets.
    #[must_use]
    pub fn header_value(&self) -> String {
        self.lock()
            .iter()
            .map(|c| format!("{}={}", c.name(), c.value()))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl StorageBackend for CookieMirror {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).map(|c| c.value().to_owned())
    }

    fn set(&self, key: &str, value: &str) {
        let built = Cookie::build((key.to_owned(), value.to_owned()))
            .path("/")
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(Duration::days(COOKIE_MAX_AGE_DAYS));
        self.lock().add(built);
    }

    fn remove(&self, key: &str) {
        self.lock().remove(Cookie::from(key.to_owned()));
    }
}

#[cfg(test)]
#[path = "cookie_test.rs"]
mod tests;
