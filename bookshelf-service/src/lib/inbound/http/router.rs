use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::InvalidHeaderValue;
use axum::http::HeaderValue;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::books::create_book::create_book;
use super::handlers::books::delete_book::delete_book;
use super::handlers::books::list_books::list_books;
use super::handlers::books::update_book::update_book;
use super::handlers::get_current_user::get_current_user;
use super::handlers::health::health;
use super::handlers::login::login;
use super::handlers::register::register;
use super::middleware::authenticate as auth_middleware;
use crate::domain::book::ports::BookServicePort;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub book_service: Arc<dyn BookServicePort>,
    pub session_service: Arc<dyn SessionServicePort>,
}

/// CORS for a single configured origin, or permissive when none is set.
pub fn cors_layer(allowed_origin: Option<&str>) -> Result<CorsLayer, InvalidHeaderValue> {
    match allowed_origin {
        Some(origin) => Ok(CorsLayer::new()
            .allow_origin(HeaderValue::from_str(origin)?)
            .allow_methods(Any)
            .allow_headers(Any)),
        None => Ok(CorsLayer::permissive()),
    }
}

pub fn create_router(state: AppState, cors: CorsLayer) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login));

    let protected_routes = Router::new()
        .route("/api/auth/user", get(get_current_user))
        .route("/api/books", get(list_books).post(create_book))
        .route("/api/books/:book_id", put(update_book).delete(delete_book))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers are left out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_layer_accepts_origin() {
        assert!(cors_layer(Some("http://localhost:3000")).is_ok());
        assert!(cors_layer(None).is_ok());
    }

    #[test]
    fn test_cors_layer_rejects_unprintable_origin() {
        assert!(cors_layer(Some("http://bad\norigin")).is_err());
    }
}
