use chrono::Duration;

use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::IdentityClaims;
use crate::token::TokenError;
use crate::token::TokenService;

/// Authentication coordinator combining password verification and token
/// issuance.
///
/// Holds the only process-wide authentication state: the signing secret
/// (inside the token service) and the optional token lifetime. Both are
/// fixed at construction.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_service: TokenService,
    token_lifetime: Option<Duration>,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `secret` - Secret key for token signing
    /// * `token_lifetime` - Lifetime of issued tokens, `None` for no expiry
    pub fn new(secret: &[u8], token_lifetime: Option<Duration>) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_service: TokenService::new(secret),
            token_lifetime,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password against a stored digest and issue a token for
    /// `email`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored digest is unusable
    /// * `TokenError` - Token could not be signed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        email: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let claims = IdentityClaims::for_identity(email, self.token_lifetime);
        let access_token = self.token_service.issue(&claims)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Validate a token and decode its claims.
    ///
    /// # Errors
    /// * `TokenError` - Token is malformed, forged, or expired
    pub fn validate_token(&self, token: &str) -> Result<IdentityClaims, TokenError> {
        self.token_service.verify(token)
    }
}
