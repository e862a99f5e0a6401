//! Authentication primitives for the account service.
//!
//! - Password hashing (Argon2id, salted, PHC string digests)
//! - Access token issuance and verification (HS256 JWT bound to an email)
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let digest = hasher.hash("Str0ng!Pass").unwrap();
//! assert!(hasher.verify("Str0ng!Pass", &digest).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{IdentityClaims, TokenService};
//!
//! let service = TokenService::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = IdentityClaims::for_identity("alice@example.com", None);
//! let token = service.issue(&claims).unwrap();
//! assert_eq!(service.verify(&token).unwrap(), claims);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", None);
//!
//! // Register: hash password
//! let digest = auth.hash_password("Str0ng!Pass").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("Str0ng!Pass", &digest, "alice@example.com").unwrap();
//!
//! // Protected request: validate token
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.email, "alice@example.com");
//! ```

pub mod authenticator;
pub mod password;
pub mod token;

pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::IdentityClaims;
pub use token::TokenError;
pub use token::TokenService;
