use thiserror::Error;

/// Failures of the password hasher.
///
/// A wrong password is not an error: `verify` reports it as `Ok(false)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    /// Argon2 could not produce a digest.
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// The stored digest could not be parsed or checked.
    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}
