pub mod auth;
pub mod books;

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Url};

use crate::domain::messages::ErrorResponse;

/// HTTP client for the bookshelf JSON API.
pub struct BookshelfClient {
    base_url: Url,
    http: Client,
    token: Option<String>,
}

impl BookshelfClient {
    pub fn new(base_url: Url, token: Option<String>) -> Result<Self> {
        let mut normalized = base_url;
        if !normalized.path().ends_with('/') {
            normalized.set_path(&format!("{}/", normalized.path().trim_end_matches('/')));
        }

        let http = Client::builder()
            .user_agent("bookshelf-cli/1.0")
            .build()
            .context("failed to configure HTTP client")?;

        Ok(Self {
            base_url: normalized,
            http,
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn from_base_url(base_url: &str, token: Option<String>) -> Result<Self> {
        let url = Url::parse(base_url).with_context(|| format!("invalid API url: {base_url}"))?;
        Self::new(url, token)
    }

    pub fn auth(&self) -> auth::AuthClient<'_> {
        auth::AuthClient::new(self)
    }

    pub fn books(&self) -> books::BooksClient<'_> {
        books::BooksClient::new(self)
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("invalid API path: {path}"))
    }

    /// Build a request with authentication if a token is available
    pub(crate) fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        let mut request = self.http.request(method, url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request
    }

    pub(crate) async fn handle_response<T>(&self, response: reqwest::Response) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        if response.status().is_success() {
            response
                .json::<T>()
                .await
                .context("failed to deserialize response body")
        } else {
            Err(self.response_error(response).await)
        }
    }

    pub(crate) async fn response_error(&self, response: reqwest::Response) -> anyhow::Error {
        let status = response.status();
        let bytes = response.bytes().await.unwrap_or_default();

        if let Ok(err) = serde_json::from_slice::<ErrorResponse>(&bytes) {
            return anyhow!("request failed ({status}): {}", err.error);
        }

        let message = String::from_utf8_lossy(&bytes);
        anyhow!("request failed ({status}): {message}")
    }
}
