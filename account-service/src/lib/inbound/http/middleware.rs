use auth::Authenticator;
use auth::TokenError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use thiserror::Error;

use crate::inbound::http::handlers::ApiResponseBody;
use crate::inbound::http::router::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Extension type to store the authenticated identity in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub email: String,
}

/// Why the gate refused a request.
///
/// A missing credential is a malformed request (400); a credential that is
/// present but unusable is an authentication failure (401).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateRejection {
    #[error("No token provided")]
    MissingToken,

    #[error("Malformed authorization header")]
    MalformedHeader,

    #[error("Invalid or expired token: {0}")]
    InvalidToken(#[from] TokenError),
}

impl IntoResponse for GateRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            GateRejection::MissingToken => (StatusCode::BAD_REQUEST, self.to_string()),
            GateRejection::MalformedHeader => (StatusCode::UNAUTHORIZED, self.to_string()),
            GateRejection::InvalidToken(_) => (
                StatusCode::UNAUTHORIZED,
                "Invalid or expired token".to_string(),
            ),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

/// Check the request's credential.
///
/// # Returns
/// The identity bound into a valid token
///
/// # Errors
/// * `MissingToken` - No Authorization header
/// * `MalformedHeader` - Header is not `Bearer <token>`
/// * `InvalidToken` - Token is malformed, forged, or expired
pub fn authorize(
    headers: &HeaderMap,
    authenticator: &Authenticator,
) -> Result<AuthenticatedUser, GateRejection> {
    let token = extract_bearer_token(headers)?;
    let claims = authenticator.validate_token(token)?;

    Ok(AuthenticatedUser {
        email: claims.email,
    })
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, GateRejection> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(GateRejection::MissingToken)?;

    let value = header
        .to_str()
        .map_err(|_| GateRejection::MalformedHeader)?;

    match value.strip_prefix(BEARER_PREFIX).map(str::trim) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(GateRejection::MalformedHeader),
    }
}

/// Middleware that admits requests carrying a valid token and attaches the
/// caller's identity for downstream handlers.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, GateRejection> {
    let user = authorize(req.headers(), &state.authenticator).inspect_err(|rejection| {
        tracing::warn!(reason = %rejection, uri = %req.uri(), "Request rejected by auth gate");
    })?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
