use axum::extract::rejection::FormRejection;
use axum::extract::rejection::JsonRejection;
use axum::http::header;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use serde_json::json;

use crate::user::errors::UserError;
use crate::user::models::User;

pub mod authenticate;
pub mod create_user;
pub mod delete_user;
pub mod get_current_user;
pub mod get_user;
pub mod list_users;
pub mod update_user;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

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
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Field-level error entry, rendered inside a `detail` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDetail {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ErrorDetail {
    pub fn new(loc: &[&str], msg: impl Into<String>, kind: &str) -> Self {
        Self {
            loc: loc.iter().map(|part| part.to_string()).collect(),
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(ErrorDetail),
    NotFound(String),
    Conflict(ErrorDetail),
    Unauthorized(String),
    Forbidden(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "Internal server error" })),
                )
                    .into_response()
            }
            ApiError::UnprocessableEntity(detail) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "detail": [detail] })),
            )
                .into_response(),
            ApiError::Conflict(detail) => {
                (StatusCode::CONFLICT, Json(json!({ "detail": [detail] }))).into_response()
            }
            ApiError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(json!({ "detail": msg }))).into_response()
            }
            ApiError::Forbidden(msg) => {
                (StatusCode::FORBIDDEN, Json(json!({ "detail": msg }))).into_response()
            }
            ApiError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Bearer")],
                Json(json!({ "detail": msg })),
            )
                .into_response(),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match &err {
            UserError::NotAuthenticated | UserError::InvalidCredentials => {
                ApiError::Unauthorized(err.to_string())
            }
            UserError::Forbidden(permission) => ApiError::Forbidden(permission.to_string()),
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::UsernameAlreadyExists(_) => ApiError::Conflict(ErrorDetail::new(
                &["body", "username"],
                err.to_string(),
                "value_error.conflict",
            )),
            UserError::EmailAlreadyExists(_) => ApiError::Conflict(ErrorDetail::new(
                &["body", "email"],
                err.to_string(),
                "value_error.conflict",
            )),
            UserError::InvalidUsername(e) => ApiError::UnprocessableEntity(ErrorDetail::new(
                &["body", "username"],
                e.to_string(),
                "value_error",
            )),
            UserError::InvalidEmail(e) => ApiError::UnprocessableEntity(ErrorDetail::new(
                &["body", "email"],
                e.to_string(),
                "value_error.email",
            )),
            UserError::InvalidRole(e) => ApiError::UnprocessableEntity(ErrorDetail::new(
                &["body", "role"],
                e.to_string(),
                "value_error",
            )),
            UserError::InvalidUserId(e) => ApiError::UnprocessableEntity(ErrorDetail::new(
                &["path", "id"],
                e.to_string(),
                "type_error.integer",
            )),
            UserError::Password(_) | UserError::DatabaseError(_) | UserError::Token(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let kind = match &rejection {
            JsonRejection::JsonDataError(_) => "value_error.missing",
            _ => "value_error.jsondecode",
        };
        ApiError::UnprocessableEntity(ErrorDetail::new(&["body"], rejection.body_text(), kind))
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::UnprocessableEntity(ErrorDetail::new(
            &["body"],
            rejection.body_text(),
            "value_error.missing",
        ))
    }
}

/// Outward representation of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.value(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            role: user.role.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}

pub async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Root" }))
}
