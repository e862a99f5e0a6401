use std::sync::Arc;

use account_service::domain::user::service::UserService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryUserRepository;
use auth::Authenticator;
use serde_json::json;
use serde_json::Value;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const VALID_PASSWORD: &str = "Str0ng!Pass";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub repository: Arc<InMemoryUserRepository>,
    pub authenticator: Arc<Authenticator>,
    pub api_client: reqwest::Client,
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

        let repository = Arc::new(InMemoryUserRepository::new());
        let authenticator = Arc::new(Authenticator::new(TEST_SECRET, None));
        let user_service = Arc::new(UserService::new(
            Arc::clone(&repository),
            Arc::clone(&authenticator),
        ));

        let router = create_router(user_service, Arc::clone(&authenticator));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            repository,
            authenticator,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Register an account with valid fields for `email`.
    pub async fn register(&self, email: &str) -> reqwest::Response {
        self.post("/api/v1/register")
            .json(&registration_body(email))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in and return the parsed response body.
    pub async fn login(&self, email: &str, password: &str) -> (reqwest::StatusCode, Value) {
        let response = self
            .post("/api/v1/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let body = response.json().await.expect("Failed to parse response");
        (status, body)
    }
}

pub fn registration_body(email: &str) -> Value {
    json!({
        "userName": "alice_01",
        "firstName": "Alice",
        "lastName": "Liddell",
        "email": email,
        "password": VALID_PASSWORD
    })
}
