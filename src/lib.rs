//! # taskmarket-client
//!
//! Client-side session core for the TaskMarket local-services marketplace.
//! The rest of the application (job listings, bid forms, dashboards) talks to
//! the backend REST API through this crate.
//!
//! ARCHITECTURE
//! ============
//! Two coupled components: [`net::ApiClient`] attaches bearer credentials to
//! every outbound request and transparently recovers once from an expired
//! access token, and [`state::AuthSession`] is the single source of truth for
//! the current user. Both write through the same [`store::TokenStore`], which
//! mirrors the access token into a script-readable store and a cookie store
//! so client code and edge routing middleware always agree on auth state.
//!
//! The transport layer never navigates. Session-ending failures surface as
//! [`net::ApiError::SessionExpired`], and [`state::nav`] turns that signal
//! into a navigation target (or suppresses it on auth pages).

pub mod config;
pub mod net;
pub mod state;
pub mod store;

pub use config::ApiConfig;
pub use net::{ApiClient, ApiError, AuthApi};
pub use state::{AuthSession, Navigation, SessionPhase};
pub use store::{MemoryStore, StorageBackend, TokenStore};
