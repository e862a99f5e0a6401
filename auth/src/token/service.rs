use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::IdentityClaims;
use super::errors::TokenError;

/// Issues and verifies stateless access tokens.
///
/// Tokens are HS256 JWTs signed with a server-held secret. Nothing is stored
/// server side: a token is valid if and only if its signature checks out
/// against the secret and its `exp` (when present) has not passed.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenService {
    /// Create a token service with a signing secret.
    ///
    /// # Arguments
    /// * `secret` - HMAC key, at least 32 bytes recommended for HS256
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Sign `claims` into a token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn issue(&self, claims: &IdentityClaims) -> Result<String, TokenError> {
        encode(&Header::new(self.algorithm), claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token's signature and decode its claims.
    ///
    /// # Errors
    /// * `Malformed` - Not a JWT, undecodable segments, or unexpected algorithm
    /// * `InvalidSignature` - Signed with a different secret or tampered with
    /// * `Expired` - `exp` claim is in the past
    pub fn verify(&self, token: &str) -> Result<IdentityClaims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Tokens issued without a lifetime carry no `exp`.
        validation.required_spec_claims.clear();

        decode::<IdentityClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed(e.to_string()),
            })
    }
}
