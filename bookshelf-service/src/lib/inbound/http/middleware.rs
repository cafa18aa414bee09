use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::session::models::AuthOutcome;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Middleware that runs the session check and attaches the caller's identity
/// to request extensions.
///
/// Rejected requests never reach the handler.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // A header that is not visible ASCII carries no usable token.
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    match state
        .session_service
        .authenticate(authorization.as_deref())
        .await
    {
        AuthOutcome::Attached(user) => {
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        AuthOutcome::Rejected(rejection) => Err(ApiError::from(rejection)),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use auth::Authenticator;
    use auth::InvalidReason;
    use axum::body::Body;
    use axum::http::HeaderValue;
    use axum::http::StatusCode;
    use axum::middleware;
    use axum::routing::get;
    use axum::Extension;
    use axum::Router;
    use chrono::Duration;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::book::service::BookService;
    use crate::domain::session::models::AuthenticatedUser;
    use crate::domain::session::models::Rejection;
    use crate::domain::session::ports::SessionServicePort;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::UserId;
    use crate::domain::user::models::UserName;
    use crate::domain::user::service::UserService;
    use crate::outbound::repositories::InMemoryBookRepository;
    use crate::outbound::repositories::InMemoryUserRepository;

    /// Session check with a canned answer that records the header it saw.
    struct FixedSession {
        outcome: AuthOutcome,
        seen: std::sync::Mutex<Vec<Option<String>>>,
    }

    #[async_trait]
    impl SessionServicePort for FixedSession {
        async fn authenticate(&self, authorization: Option<&str>) -> AuthOutcome {
            self.seen
                .lock()
                .unwrap()
                .push(authorization.map(str::to_owned));
            self.outcome.clone()
        }
    }

    fn user() -> AuthenticatedUser {
        AuthenticatedUser {
            id: UserId::new(),
            name: UserName::new("Ada".to_string()).unwrap(),
            email: EmailAddress::new("ada@example.com".to_string()).unwrap(),
        }
    }

    fn app(session: Arc<FixedSession>) -> Router {
        let authenticator = Arc::new(Authenticator::new(
            b"middleware-test-secret-at-least-32-bytes",
            Duration::hours(1),
        ));
        let state = AppState {
            user_service: Arc::new(UserService::new(
                Arc::new(InMemoryUserRepository::new()),
                authenticator,
            )),
            book_service: Arc::new(BookService::new(Arc::new(InMemoryBookRepository::new()))),
            session_service: session,
        };

        Router::new()
            .route(
                "/protected",
                get(|Extension(user): Extension<AuthenticatedUser>| async move {
                    user.name.as_str().to_string()
                }),
            )
            .route_layer(middleware::from_fn_with_state(state.clone(), authenticate))
            .with_state(state)
    }

    async fn call(router: Router, authorization: Option<&str>) -> (StatusCode, String) {
        let mut builder = axum::http::Request::builder().uri("/protected");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        send(router, builder.body(Body::empty()).unwrap()).await
    }

    async fn send(router: Router, request: Request) -> (StatusCode, String) {
        let response = router.oneshot(request).await.unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_attached_user_reaches_handler() {
        let session = Arc::new(FixedSession {
            outcome: AuthOutcome::Attached(user()),
            seen: Default::default(),
        });

        let (status, body) = call(app(Arc::clone(&session)), Some("Bearer abc")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Ada");
        assert_eq!(
            *session.seen.lock().unwrap(),
            vec![Some("Bearer abc".to_string())]
        );
    }

    #[tokio::test]
    async fn test_rejection_short_circuits_with_envelope() {
        let session = Arc::new(FixedSession {
            outcome: AuthOutcome::Rejected(Rejection::InvalidToken(InvalidReason::Expired)),
            seen: Default::default(),
        });

        let (status, body) = call(app(session), Some("Bearer stale")).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status_code"], 401);
        assert_eq!(json["data"]["message"], "Invalid token");
    }

    #[tokio::test]
    async fn test_missing_header_passed_as_none() {
        let session = Arc::new(FixedSession {
            outcome: AuthOutcome::Rejected(Rejection::MissingCredentials),
            seen: Default::default(),
        });

        let (status, _) = call(app(Arc::clone(&session)), None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(*session.seen.lock().unwrap(), vec![None]);
    }

    #[tokio::test]
    async fn test_non_utf8_header_passed_as_none() {
        let session = Arc::new(FixedSession {
            outcome: AuthOutcome::Rejected(Rejection::MissingCredentials),
            seen: Default::default(),
        });
        let request = axum::http::Request::builder()
            .uri("/protected")
            .header(
                header::AUTHORIZATION,
                HeaderValue::from_bytes(b"Bearer \xff").unwrap(),
            )
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(app(Arc::clone(&session)), request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("Not authorized"));
        assert_eq!(*session.seen.lock().unwrap(), vec![None]);
    }

    #[tokio::test]
    async fn test_unknown_subject_is_not_found() {
        let session = Arc::new(FixedSession {
            outcome: AuthOutcome::Rejected(Rejection::UnknownSubject(UserId::new())),
            seen: Default::default(),
        });

        let (status, body) = call(app(session), Some("Bearer ghost")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("User does not exist"));
    }
}
