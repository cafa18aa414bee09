use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use super::BookData;
use super::BookRequest;
use crate::domain::session::models::AuthenticatedUser;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Add a book owned by the caller.
pub async fn create_book(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Json(body): Json<BookRequest>,
) -> Result<ApiSuccess<BookData>, ApiError> {
    let title = body.try_into_title()?;

    state
        .book_service
        .create_book(title, auth_user.id)
        .await
        .map_err(ApiError::from)
        .map(|ref book| ApiSuccess::new(StatusCode::CREATED, book.into()))
}
