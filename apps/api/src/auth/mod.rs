//! Email/password accounts and bearer-token authentication.

pub mod extractor;
pub mod handlers;
pub mod password;
pub mod token;
pub mod users;

use thiserror::Error;

pub use extractor::AuthUser;
pub use token::JwtKeys;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Not authorized, token missing or invalid")]
    MissingToken,

    #[error("Not authorized, token missing or invalid")]
    InvalidToken,

    #[error("Not authorized, token missing or invalid")]
    Expired,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token signing failed: {0}")]
    Signing(String),
}
