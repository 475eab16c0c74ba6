use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication failure. Messages are shown to the user as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Please enter your email address.")]
    MissingEmail,

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Please enter your password.")]
    MissingPassword,

    #[error("Please enter your name.")]
    MissingName,
}
