use anyhow::Result;

use super::BookshelfClient;
use crate::domain::book_items::{Book, BookFilter, NewBook, UpdateBook};
use crate::domain::ids::BookId;
use crate::domain::messages::MessageResponse;

const BOOKS_PATH: &str = "api/books";

pub struct BooksClient<'a> {
    client: &'a BookshelfClient,
}

impl<'a> BooksClient<'a> {
    pub fn new(client: &'a BookshelfClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, filter: &BookFilter) -> Result<Vec<Book>> {
        let mut url = self.client.endpoint(BOOKS_PATH)?;
        if let Some(search) = &filter.search {
            url.query_pairs_mut().append_pair("search", search);
        }
        if let Some(category) = &filter.category {
            url.query_pairs_mut().append_pair("category", category);
        }
        let response = self
            .client
            .request(reqwest::Method::GET, url)
            .send()
            .await?;
        self.client.handle_response(response).await
    }

    pub async fn create(&self, payload: &NewBook) -> Result<Book> {
        let url = self.client.endpoint(BOOKS_PATH)?;
        let response = self
            .client
            .request(reqwest::Method::POST, url)
            .json(payload)
            .send()
            .await?;
        self.client.handle_response(response).await
    }

    pub async fn get(&self, id: BookId) -> Result<Book> {
        let url = self.client.endpoint(&format!("{BOOKS_PATH}/{id}"))?;
        let response = self
            .client
            .request(reqwest::Method::GET, url)
            .send()
            .await?;
        self.client.handle_response(response).await
    }

    pub async fn update(&self, id: BookId, payload: &UpdateBook) -> Result<MessageResponse> {
        let url = self.client.endpoint(&format!("{BOOKS_PATH}/{id}"))?;
        let response = self
            .client
            .request(reqwest::Method::PUT, url)
            .json(payload)
            .send()
            .await?;
        self.client.handle_response(response).await
    }

    pub async fn delete(&self, id: BookId) -> Result<MessageResponse> {
        let url = self.client.endpoint(&format!("{BOOKS_PATH}/{id}"))?;
        let response = self
            .client
            .request(reqwest::Method::DELETE, url)
            .send()
            .await?;
        self.client.handle_response(response).await
    }

    pub async fn categories(&self) -> Result<Vec<String>> {
        let url = self.client.endpoint("api/categories")?;
        let response = self
            .client
            .request(reqwest::Method::GET, url)
            .send()
            .await?;
        self.client.handle_response(response).await
    }
}
