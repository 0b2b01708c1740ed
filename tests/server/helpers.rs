use bookshelf::application::routes::{app_router, cors_layer};
use bookshelf::application::state::{AppState, AppStateConfig};
use bookshelf::domain::book_items::Book;
use bookshelf::domain::tokens::AuthSession;
use bookshelf::infrastructure::auth::TokenSigner;
use bookshelf::infrastructure::database::Database;
use axum::http::HeaderValue;
use reqwest::Client;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::task::AbortHandle;

pub const TEST_SECRET: &[u8] = b"integration-test-secret";

pub struct TestApp {
    pub address: String,
    pub client: Client,
    server_handle: AbortHandle,
}

impl TestApp {
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.address, path)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.server_handle.abort();
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_signer(TokenSigner::new(TEST_SECRET, chrono::Duration::days(7))).await
}

pub async fn spawn_app_with_signer(token_signer: TokenSigner) -> TestApp {
    spawn(token_signer, None).await
}

/// Spawn the app allowing cross-origin requests from `origin`.
pub async fn spawn_app_with_origin(origin: &'static str) -> TestApp {
    let signer = TokenSigner::new(TEST_SECRET, chrono::Duration::days(7));
    spawn(signer, Some(HeaderValue::from_static(origin))).await
}

async fn spawn(token_signer: TokenSigner, allowed_origin: Option<HeaderValue>) -> TestApp {
    let database = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    let state = AppState::from_database(&database, AppStateConfig { token_signer });
    let app = app_router(state, cors_layer(allowed_origin));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");

    let local_addr = listener.local_addr().expect("Failed to get local address");
    let address = format!("http://{local_addr}");

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Server failed to start");
    })
    .abort_handle();

    TestApp {
        address,
        client: Client::new(),
        server_handle,
    }
}

/// Register a user and return the session (token + public user).
pub async fn register(app: &TestApp, email: &str, password: &str) -> AuthSession {
    let response = app
        .client
        .post(app.api_url("/register"))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("failed to register");
    assert_eq!(response.status(), 200, "registration of {email} failed");
    response.json().await.expect("failed to parse session")
}

pub async fn create_book(
    app: &TestApp,
    token: &str,
    title: &str,
    author: &str,
    category: &str,
) -> Book {
    let response = app
        .client
        .post(app.api_url("/books"))
        .bearer_auth(token)
        .json(&json!({ "title": title, "author": author, "category": category }))
        .send()
        .await
        .expect("failed to create book");
    assert_eq!(response.status(), 201, "creating {title} failed");
    response.json().await.expect("failed to parse book")
}

pub async fn list_books(app: &TestApp, token: &str, query: &[(&str, &str)]) -> Vec<Book> {
    let response = app
        .client
        .get(app.api_url("/books"))
        .bearer_auth(token)
        .query(query)
        .send()
        .await
        .expect("failed to list books");
    assert_eq!(response.status(), 200);
    response.json().await.expect("failed to parse books")
}
