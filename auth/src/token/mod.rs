//! Signed, stateless access tokens (HS256 JWT).

pub mod claims;
pub mod errors;
pub mod service;

pub use claims::IdentityClaims;
pub use errors::TokenError;
pub use service::TokenService;
