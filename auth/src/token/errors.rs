use thiserror::Error;

/// Error type for token operations.
///
/// Verification failures are split by cause so callers can tell a garbled
/// token from a forged or stale one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature does not match")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,
}
