use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::BookData;
use super::BookRequest;
use crate::domain::book::errors::BookError;
use crate::domain::book::models::BookId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
    Json(body): Json<BookRequest>,
) -> Result<ApiSuccess<BookData>, ApiError> {
    let book_id = BookId::from_string(&book_id).map_err(BookError::from)?;
    let title = body.try_into_title()?;

    state
        .book_service
        .update_book(book_id, title)
        .await
        .map_err(ApiError::from)
        .map(|ref book| ApiSuccess::new(StatusCode::OK, book.into()))
}
