use anyhow::Result;
use serde::Serialize;

use super::BookshelfClient;
use crate::domain::tokens::AuthSession;

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

pub struct AuthClient<'a> {
    client: &'a BookshelfClient,
}

impl<'a> AuthClient<'a> {
    pub fn new(client: &'a BookshelfClient) -> Self {
        Self { client }
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<AuthSession> {
        self.post(
            "api/register",
            &Credentials {
                email,
                password,
                name,
            },
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession> {
        self.post(
            "api/login",
            &Credentials {
                email,
                password,
                name: None,
            },
        )
        .await
    }

    async fn post(&self, path: &str, credentials: &Credentials<'_>) -> Result<AuthSession> {
        let url = self.client.endpoint(path)?;
        let response = self
            .client
            .request(reqwest::Method::POST, url)
            .json(credentials)
            .send()
            .await?;
        self.client.handle_response(response).await
    }
}
