//! Process-wide auth session state.
//!
//! DESIGN
//! ======
//! One [`AuthSession`] is constructed at application start and injected into
//! everything that talks to the backend; handles are cheap clones over
//! shared inner state. `init` runs its resolution exactly once even if
//! startup re-triggers it while an external session provider settles.
//!
//! Ordering: on every authenticated transition tokens are persisted before
//! the user is set, so the HTTP client's independent store reads never
//! observe a user without credentials.

use std::sync::{Arc, Mutex, MutexGuard};

use super::nav::{self, Navigation};
use crate::net::{
    ApiError, AuthApi, LoginRequest, LoginSuccess, RegisterOutcome, RegisterRequest, TokenPair,
    User,
};
use crate::store::TokenStore;

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// `init` has not run yet.
    Uninitialized,
    /// A persisted token was found and the profile fetch is in flight.
    Resolving,
    Unauthenticated,
    Authenticated,
}

/// Token material handed over by an external session provider (social
/// login) before it has been mirrored into local storage.
#[derive(Debug, Clone)]
pub struct ExternalSession {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

/// Point-in-time view of the session for UI consumption.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub user: Option<User>,
    pub loading: bool,
    /// Display-ready message from the most recent failed operation.
    pub error: Option<String>,
}

struct SessionInner {
    phase: SessionPhase,
    user: Option<User>,
    loading: bool,
    error: Option<String>,
    init_started: bool,
}

// =============================================================================
// SESSION
// =============================================================================

#[derive(Clone)]
pub struct AuthSession {
    api: Arc<dyn AuthApi>,
    store: TokenStore,
    inner: Arc<Mutex<SessionInner>>,
}

impl AuthSession {
    #[must_use]
    pub fn new(api: Arc<dyn AuthApi>, store: TokenStore) -> Self {
        Self {
            api,
            store,
            inner: Arc::new(Mutex::new(SessionInner {
                phase: SessionPhase::Uninitialized,
                user: None,
                loading: false,
                error: None,
                init_started: false,
            })),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let inner = self.lock();
        SessionSnapshot {
            phase: inner.phase,
            user: inner.user.clone(),
            loading: inner.loading,
            error: inner.error.clone(),
        }
    }

    /// The token store this session writes through.
    #[must_use]
    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    // =========================================================================
    // INIT
    // =========================================================================

    /// Resolve the persisted session once at application start.
    ///
    /// Re-entrant calls return immediately: startup conditions (an external
    /// session object settling, effects re-firing) may trigger this several
    /// times, and the resolution must not run twice.
    pub async fn init(&self, current_path: &str, external: Option<ExternalSession>) {
        {
            let mut inner = self.lock();
            if inner.init_started {
                return;
            }
            inner.init_started = true;
            inner.phase = SessionPhase::Resolving;
            inner.loading = true;
        }

        let access = match (self.store.access(), external) {
            (Some(access), _) => Some(access),
            (None, Some(external)) => {
                // Mirror the provider's tokens so the HTTP client and the
                // routing middleware see them too.
                match &external.refresh_token {
                    Some(refresh) => self.store.set_tokens(&external.access_token, refresh),
                    None => self.store.set_access(&external.access_token),
                }
                Some(external.access_token)
            }
            (None, None) => None,
        };

        if access.is_none() {
            let mut inner = self.lock();
            inner.phase = SessionPhase::Unauthenticated;
            inner.loading = false;
            return;
        }

        match self.api.fetch_profile().await {
            Ok(user) => {
                let mut inner = self.lock();
                inner.user = Some(user);
                inner.phase = SessionPhase::Authenticated;
                inner.loading = false;
            }
            Err(error) => {
                self.store.clear();
                tracing::debug!(error = %error, "session resolution failed");
                let mut inner = self.lock();
                inner.user = None;
                inner.phase = SessionPhase::Unauthenticated;
                inner.loading = false;
                // Mid-flow on an auth page the failure stays silent so the
                // form the user is filling in is not disturbed.
                if !nav::is_auth_page(current_path) {
                    inner.error = Some(error.display_message());
                }
            }
        }
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    /// Authenticate with email and password.
    ///
    /// # Errors
    ///
    /// Rethrows the API error after recording its display message, so form
    /// callers can react while the snapshot carries the message.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<User, ApiError> {
        self.begin_operation();
        match self.api.login(credentials).await {
            Ok(success) => Ok(self.establish(success)),
            Err(error) => Err(self.fail_operation(error)),
        }
    }

    /// Create an account. The outcome is returned as-is so callers can
    /// render the check-your-email screen when verification is required.
    ///
    /// # Errors
    ///
    /// Rethrows the API error after recording its display message.
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterOutcome, ApiError> {
        // A half-logged-in leftover from a previous session must not bleed
        // into a fresh registration.
        self.store.clear();
        self.begin_operation();
        match self.api.register(request).await {
            Ok(RegisterOutcome::Complete(success)) => {
                self.establish(success.clone());
                Ok(RegisterOutcome::Complete(success))
            }
            Ok(outcome) => {
                let mut inner = self.lock();
                inner.loading = false;
                Ok(outcome)
            }
            Err(error) => Err(self.fail_operation(error)),
        }
    }

    /// Direct entry with already-issued tokens, used after out-of-band
    /// email verification. No network call.
    pub fn login_with_tokens(&self, tokens: TokenPair, user: User) {
        self.establish(LoginSuccess { tokens, user });
    }

    /// Replace the stored profile wholesale after a profile-edit flow
    /// completed elsewhere. No network call, no transition.
    pub fn update_user(&self, user: User) {
        self.lock().user = Some(user);
    }

    /// End the session from any state. Returns the landing-page navigation
    /// for the caller to perform.
    pub fn logout(&self) -> Navigation {
        self.store.clear();
        let mut inner = self.lock();
        inner.user = None;
        inner.error = None;
        inner.loading = false;
        inner.phase = SessionPhase::Unauthenticated;
        Navigation::Landing
    }

    /// Report an [`ApiError::SessionExpired`] signal from any caller. Ends
    /// the session and returns where to navigate, already suppressed for
    /// auth pages and the landing page.
    pub fn expire(&self, current_path: &str) -> Option<Navigation> {
        // The client cleared the stores before signalling; clearing again
        // keeps this safe to call from any path.
        self.store.clear();
        let target = nav::after_session_expired(current_path);
        let mut inner = self.lock();
        inner.user = None;
        inner.phase = SessionPhase::Unauthenticated;
        inner.loading = false;
        if target.is_some() {
            inner.error = Some(ApiError::SessionExpired.display_message());
        }
        target
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    fn begin_operation(&self) {
        let mut inner = self.lock();
        inner.loading = true;
        inner.error = None;
    }

    fn fail_operation(&self, error: ApiError) -> ApiError {
        let mut inner = self.lock();
        inner.loading = false;
        inner.error = Some(error.display_message());
        error
    }

    fn establish(&self, success: LoginSuccess) -> User {
        // Tokens first: a concurrent store read must never observe a user
        // without credentials.
        self.store.set_tokens(&success.tokens.access, &success.tokens.refresh);
        let mut inner = self.lock();
        inner.user = Some(success.user.clone());
        inner.phase = SessionPhase::Authenticated;
        inner.loading = false;
        inner.error = None;
        success.user
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
