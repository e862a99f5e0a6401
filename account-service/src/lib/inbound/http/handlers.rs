use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::user::errors::UserError;
use crate::domain::user::errors::ValidationErrors;
use crate::domain::user::errors::Violation;
use crate::domain::user::models::User;

pub mod list_users;
pub mod login;
pub mod profile;
pub mod register;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
const VALIDATION_FAILED_MESSAGE: &str = "Validation failed";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    Validation(ValidationErrors),
    NotFound(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::InternalServerError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiResponseBody::new_error(StatusCode::INTERNAL_SERVER_ERROR, msg),
            ),
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ApiResponseBody::new_error(StatusCode::BAD_REQUEST, msg),
            ),
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ApiResponseBody::new_validation_error(StatusCode::BAD_REQUEST, &errors),
            ),
            ApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ApiResponseBody::new_error(StatusCode::NOT_FOUND, msg),
            ),
            ApiError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                ApiResponseBody::new_error(StatusCode::UNAUTHORIZED, msg),
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(errors) => ApiError::Validation(errors),
            UserError::EmailAlreadyExists(_) => {
                ApiError::BadRequest("User already exists".to_string())
            }
            UserError::UnknownEmail(_) => ApiError::BadRequest("User does not exist".to_string()),
            UserError::PasswordMismatch => ApiError::BadRequest("Password mismatch".to_string()),
            UserError::NotFound(_) => ApiError::NotFound("User not found".to_string()),
            UserError::NoUsers => ApiError::BadRequest("No users exist".to_string()),
            UserError::Password(_)
            | UserError::Token(_)
            | UserError::DatabaseError(_)
            | UserError::Unknown(_) => {
                tracing::error!(error = %err, "Request failed");
                ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Request body rejected");
        ApiError::BadRequest(VALIDATION_FAILED_MESSAGE.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData {
                message,
                violations: Vec::new(),
            },
        }
    }

    pub fn new_validation_error(status_code: StatusCode, errors: &ValidationErrors) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData {
                message: errors.to_string(),
                violations: errors.violations().to_vec(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<Violation>,
}

/// Public view of an account. Has no digest field, so a password hash
/// cannot be serialized by accident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: String,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            user_name: user.username.as_str().to_string(),
            first_name: user.first_name.as_str().to_string(),
            last_name: user.last_name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}
