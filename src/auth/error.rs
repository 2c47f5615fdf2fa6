use thiserror::Error;

/// Authentication errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Email/password combination did not match.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Password was empty.
    #[error("Password is required")]
    MissingPassword,

    /// Hashing or hash parsing failed.
    #[error("Password hash error: {0}")]
    PasswordHash(String),

    /// Token is malformed or its signature does not verify.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Token signature is valid but it has expired.
    #[error("Token expired")]
    Expired,

    /// Expiry falls outside the representable time range.
    #[error("Token expiry out of range")]
    ExpiryOutOfRange,
}
