//! Backend REST transport.
//!
//! [`ApiClient`] is the only way requests leave the application: it injects
//! the bearer credential from the token store and recovers once from an
//! expired access token. [`AuthApi`] is the seam session state consumes, so
//! state tests never touch the network.

pub mod api;
pub mod error;
pub mod types;

pub use api::ApiClient;
pub use error::{ApiError, FieldError};
pub use types::{
    AuthApi, LoginRequest, LoginSuccess, RegisterOutcome, RegisterRequest, TokenPair, User,
    UserRole,
};
