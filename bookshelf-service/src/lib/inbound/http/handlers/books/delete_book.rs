use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::MessageData;
use crate::domain::book::errors::BookError;
use crate::domain::book::models::BookId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn delete_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let book_id = BookId::from_string(&book_id).map_err(BookError::from)?;

    state.book_service.delete_book(book_id).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageData {
            message: "Book deleted".to_string(),
        },
    ))
}
