//! Token persistence.
//!
//! DESIGN
//! ======
//! Two physical stores hold auth state: a script-readable store the
//! application reads, and a cookie store the edge routing middleware reads.
//! [`TokenStore`] is the only write path and fans every mutation out to
//! both, so the two can never disagree about the access token.

pub mod backend;
pub mod cookie;
pub mod tokens;

pub use backend::{MemoryStore, StorageBackend};
pub use cookie::CookieMirror;
pub use tokens::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, TokenStore};
