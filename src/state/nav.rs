//! Navigation policy for session transitions.
//!
//! The HTTP layer reports session failures as returned signals; this module
//! decides where those signals send the user, and when they must stay
//! silent. Keeping the rule here means transport code never touches routing.

pub const LANDING_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";

/// Pages that are part of the auth flow itself. A forced login redirect
/// from one of these would loop the flow the user is already in.
const AUTH_PAGES: &[&str] = &["/login", "/register", "/verify-email", "/forgot-password", "/reset-password"];

/// A navigation the UI layer should perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Login,
    Landing,
}

impl Navigation {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => LOGIN_PATH,
            Self::Landing => LANDING_PATH,
        }
    }
}

/// True when the path belongs to the auth flow (login, registration,
/// verification, password reset), including nested segments.
#[must_use]
pub fn is_auth_page(path: &str) -> bool {
    let path = normalize(path);
    AUTH_PAGES.iter().any(|page| {
        path == *page || (path.starts_with(page) && path.as_bytes().get(page.len()) == Some(&b'/'))
    })
}

/// Where to send the user after an irrecoverable session failure. `None`
/// while on an auth page or the landing page.
#[must_use]
pub fn after_session_expired(current_path: &str) -> Option<Navigation> {
    let path = normalize(current_path);
    if path == LANDING_PATH || path.is_empty() || is_auth_page(path) {
        None
    } else {
        Some(Navigation::Login)
    }
}

/// Strip query/fragment and any trailing slash so `/login/?next=/jobs`
/// matches `/login`.
fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    if path.len() > 1 { path.trim_end_matches('/') } else { path }
}

#[cfg(test)]
#[path = "nav_test.rs"]
mod tests;
