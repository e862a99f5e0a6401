use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by an access token.
///
/// The only identity bound by the token is the account email. `exp` is
/// present only when the issuer is configured with a token lifetime; a token
/// without it stays valid until the signing secret is rotated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdentityClaims {
    /// Account email (identity)
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl IdentityClaims {
    /// Claims for `email`, issued now.
    ///
    /// # Arguments
    /// * `email` - Identity to bind
    /// * `lifetime` - Token lifetime, `None` for tokens without expiry
    pub fn for_identity(email: impl Into<String>, lifetime: Option<Duration>) -> Self {
        let now = Utc::now();

        Self {
            email: email.into(),
            iat: now.timestamp(),
            exp: lifetime.map(|lifetime| (now + lifetime).timestamp()),
        }
    }
}
