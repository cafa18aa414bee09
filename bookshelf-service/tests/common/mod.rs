use std::sync::Arc;

use auth::Authenticator;
use auth::HashingParams;
use auth::JwtHandler;
use auth::PasswordHasher;
use bookshelf_service::domain::book::service::BookService;
use bookshelf_service::domain::session::service::SessionService;
use bookshelf_service::domain::user::service::UserService;
use bookshelf_service::inbound::http::router::create_router;
use bookshelf_service::inbound::http::router::AppState;
use bookshelf_service::outbound::repositories::InMemoryBookRepository;
use bookshelf_service::outbound::repositories::InMemoryUserRepository;
use chrono::Duration;
use serde_json::json;
use serde_json::Value;
use tower_http::cors::CorsLayer;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory stores
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub user_repository: Arc<InMemoryUserRepository>,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        // Cheap work factor keeps the suite fast
        let password_hasher = PasswordHasher::with_params(HashingParams {
            memory_cost_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .expect("Failed to build password hasher");
        let authenticator = Arc::new(
            Authenticator::new(JWT_SECRET, Duration::hours(24))
                .with_password_hasher(password_hasher),
        );

        let user_repository = Arc::new(InMemoryUserRepository::new());
        let book_repository = Arc::new(InMemoryBookRepository::new());

        let state = AppState {
            user_service: Arc::new(UserService::new(
                Arc::clone(&user_repository),
                Arc::clone(&authenticator),
            )),
            session_service: Arc::new(SessionService::new(
                Arc::clone(&user_repository),
                authenticator,
            )),
            book_service: Arc::new(BookService::new(book_repository)),
        };

        let app = create_router(state, CorsLayer::permissive());

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Failed to run server");
        });

        TestApp {
            address,
            api_client: reqwest::Client::new(),
            user_repository,
            jwt_handler: JwtHandler::new(JWT_SECRET),
        }
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.api_client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.api_client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_authenticated(&self, path: &str, token: &str) -> reqwest::Response {
        self.api_client
            .get(format!("{}{}", self.address, path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_authenticated(
        &self,
        path: &str,
        body: &Value,
        token: &str,
    ) -> reqwest::Response {
        self.api_client
            .post(format!("{}{}", self.address, path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put_authenticated(
        &self,
        path: &str,
        body: &Value,
        token: &str,
    ) -> reqwest::Response {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::Response {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> reqwest::Response {
        self.post_json(
            "/api/auth/register",
            &json!({
                "name": name,
                "email": email,
                "password": password,
            }),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post_json(
            "/api/auth/login",
            &json!({
                "email": email,
                "password": password,
            }),
        )
        .await
    }

    /// Register a user, log in and return `(user_id, token)`
    pub async fn signed_in_user(&self, email: &str) -> (String, String) {
        let response = self.register("Reader", email, "correct horse").await;
        assert_eq!(response.status(), 201);

        let body: Value = self.login(email, "correct horse").await.json().await.unwrap();
        let user_id = body["data"]["user"]["id"].as_str().unwrap().to_string();
        let token = body["data"]["token"].as_str().unwrap().to_string();

        (user_id, token)
    }
}
