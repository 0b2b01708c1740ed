use serde::Serialize;

use crate::domain::book_items::{Book, cover_or_placeholder};
use crate::infrastructure::local_library::LocalBook;

/// A book as shown to a reader: the cover is always a usable image URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookCardView {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub category: String,
    pub cover: String,
}

impl From<&Book> for BookCardView {
    fn from(book: &Book) -> Self {
        Self {
            id: i64::from(book.id),
            title: book.title.clone(),
            author: book.author.clone(),
            category: book.category.clone(),
            cover: book.cover_or_placeholder().to_string(),
        }
    }
}

impl From<&LocalBook> for BookCardView {
    fn from(book: &LocalBook) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            category: book.category.clone(),
            cover: cover_or_placeholder(book.cover.as_deref()).to_string(),
        }
    }
}
