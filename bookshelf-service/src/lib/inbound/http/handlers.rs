use std::fmt::Display;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::book::errors::BookError;
use crate::domain::session::models::AuthenticatedUser;
use crate::domain::session::models::Rejection;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::UserProfile;

pub mod books;
pub mod get_current_user;
pub mod health;
pub mod login;
pub mod register;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const NOT_AUTHORIZED: &str = "Not authorized";
pub const INVALID_TOKEN: &str = "Invalid token";
pub const USER_NOT_FOUND: &str = "User does not exist";
pub const ALREADY_REGISTERED: &str = "User already registered";
pub const BOOK_NOT_FOUND: &str = "Book not found";
pub const INTERNAL_ERROR: &str = "Internal server error";

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

/// Error surfaced to HTTP clients.
///
/// Messages are safe to show; internal detail is logged before one of these
/// is built and never copied into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl ApiError {
    /// Log the full fault and return a generic 500.
    pub fn internal(detail: impl Display) -> Self {
        tracing::error!(error = %detail, "Request failed with server fault");
        ApiError::InternalServerError(INTERNAL_ERROR.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::InternalServerError(msg)
            | ApiError::UnprocessableEntity(msg)
            | ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::Unauthorized(msg) => msg,
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailAlreadyExists(_) => ApiError::Conflict(ALREADY_REGISTERED.to_string()),
            UserError::InvalidCredentials => {
                ApiError::Unauthorized(INVALID_CREDENTIALS.to_string())
            }
            UserError::InvalidName(_) | UserError::InvalidEmail(_) | UserError::InvalidUserId(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            // No route looks users up by id, so a miss here is a server fault.
            UserError::NotFound(_)
            | UserError::Password(_)
            | UserError::Token(_)
            | UserError::DatabaseError(_)
            | UserError::Unknown(_) => ApiError::internal(err),
        }
    }
}

impl From<BookError> for ApiError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::NotFound(_) => ApiError::NotFound(BOOK_NOT_FOUND.to_string()),
            BookError::InvalidBookId(_) => ApiError::BadRequest(err.to_string()),
            BookError::InvalidTitle(_) => ApiError::UnprocessableEntity(err.to_string()),
            BookError::DatabaseError(_) => ApiError::internal(err),
        }
    }
}

impl From<Rejection> for ApiError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::MissingCredentials => ApiError::Unauthorized(NOT_AUTHORIZED.to_string()),
            Rejection::InvalidToken(_) => ApiError::Unauthorized(INVALID_TOKEN.to_string()),
            Rejection::TokenFault(_) => ApiError::InternalServerError(INVALID_TOKEN.to_string()),
            Rejection::UnknownSubject(_) => ApiError::NotFound(USER_NOT_FOUND.to_string()),
            Rejection::DirectoryFault(_) => {
                ApiError::InternalServerError(INTERNAL_ERROR.to_string())
            }
        }
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
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Public user projection as sent over the wire. Has no password field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&UserProfile> for UserData {
    fn from(user: &UserProfile) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
        }
    }
}

impl From<&AuthenticatedUser> for UserData {
    fn from(user: &AuthenticatedUser) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
        }
    }
}
