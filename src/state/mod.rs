//! Client-side session state.
//!
//! DESIGN
//! ======
//! [`AuthSession`] is the single source of truth for who the current user
//! is; [`nav`] holds routing policy as pure data so the transport layer can
//! stay out of navigation entirely.

pub mod nav;
pub mod session;

pub use nav::{Navigation, after_session_expired, is_auth_page};
pub use session::{AuthSession, ExternalSession, SessionPhase, SessionSnapshot};
