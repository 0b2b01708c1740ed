//! Standalone demo mode: a library kept in a small key/value store instead of
//! behind the API. Two keys are used, `library` (a JSON array of books) and
//! `theme` (`"light"` or `"dark"`). Both are read when the library is opened
//! and rewritten after every change.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::book_items::{BookFilter, NewBook, UpdateBook, distinct_categories};

const LIBRARY_KEY: &str = "library";
const THEME_KEY: &str = "theme";

#[derive(Debug, Error)]
pub enum LocalLibraryError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("no changes provided")]
    NoChanges,
    #[error("book {0} not found")]
    NotFound(i64),
    #[error("stored library is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),
}

/// Narrow read/write access to named values.
pub trait LibraryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, LocalLibraryError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), LocalLibraryError>;
}

/// Stores each key as `<key>.json` inside a directory, created on first write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl LibraryStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, LocalLibraryError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), LocalLibraryError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LibraryStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, LocalLibraryError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), LocalLibraryError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Anything other than `dark` (quoted or bare) reads as light.
    fn from_stored(raw: &str) -> Self {
        if raw.trim().trim_matches('"') == "dark" {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalBook {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub category: String,
    #[serde(default)]
    pub cover: Option<String>,
}

pub struct LocalLibrary<S: LibraryStorage> {
    storage: S,
    books: Vec<LocalBook>,
    theme: Theme,
}

impl<S: LibraryStorage> LocalLibrary<S> {
    /// Load the library and theme from `storage`. A missing library starts
    /// from the demo books.
    pub fn open(storage: S) -> Result<Self, LocalLibraryError> {
        let books = match storage.read(LIBRARY_KEY)? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => default_books(),
        };
        let theme = storage
            .read(THEME_KEY)?
            .map(|raw| Theme::from_stored(&raw))
            .unwrap_or_default();

        debug!(books = books.len(), ?theme, "opened local library");
        Ok(Self {
            storage,
            books,
            theme,
        })
    }

    pub fn books(&self) -> &[LocalBook] {
        &self.books
    }

    pub fn list(&self, filter: &BookFilter) -> Vec<&LocalBook> {
        self.books
            .iter()
            .filter(|book| filter.matches(&book.title, &book.author, &book.category))
            .collect()
    }

    pub fn categories(&self) -> Vec<String> {
        distinct_categories(self.books.iter().map(|book| book.category.as_str()))
    }

    pub fn add(&mut self, new_book: NewBook) -> Result<&LocalBook, LocalLibraryError> {
        let new_book = new_book.normalize();
        if let Some(field) = new_book.missing_field() {
            return Err(LocalLibraryError::MissingField(field));
        }

        let id = self.books.iter().map(|book| book.id).max().unwrap_or(0) + 1;
        self.books.push(LocalBook {
            id,
            title: new_book.title,
            author: new_book.author,
            category: new_book.category,
            cover: new_book.cover,
        });
        self.save_books()?;

        let index = self.books.len() - 1;
        Ok(&self.books[index])
    }

    pub fn update(&mut self, id: i64, changes: UpdateBook) -> Result<&LocalBook, LocalLibraryError> {
        let changes = changes.normalize();
        if let Some(field) = changes.missing_field() {
            return Err(LocalLibraryError::MissingField(field));
        }
        if !changes.has_changes() {
            return Err(LocalLibraryError::NoChanges);
        }

        let index = self
            .position(id)
            .ok_or(LocalLibraryError::NotFound(id))?;
        let book = &mut self.books[index];
        if let Some(title) = changes.title {
            book.title = title;
        }
        if let Some(author) = changes.author {
            book.author = author;
        }
        if let Some(category) = changes.category {
            book.category = category;
        }
        if let Some(cover) = changes.cover {
            book.cover = cover;
        }
        self.save_books()?;

        Ok(&self.books[index])
    }

    pub fn delete(&mut self, id: i64) -> Result<LocalBook, LocalLibraryError> {
        let index = self
            .position(id)
            .ok_or(LocalLibraryError::NotFound(id))?;
        let removed = self.books.remove(index);
        self.save_books()?;
        Ok(removed)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), LocalLibraryError> {
        self.theme = theme;
        let raw = serde_json::to_string(&theme)?;
        self.storage.write(THEME_KEY, &raw)
    }

    pub fn toggle_theme(&mut self) -> Result<Theme, LocalLibraryError> {
        let theme = self.theme.toggled();
        self.set_theme(theme)?;
        Ok(theme)
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn position(&self, id: i64) -> Option<usize> {
        self.books.iter().position(|book| book.id == id)
    }

    fn save_books(&mut self) -> Result<(), LocalLibraryError> {
        let raw = serde_json::to_string(&self.books)?;
        self.storage.write(LIBRARY_KEY, &raw)
    }
}

fn default_books() -> Vec<LocalBook> {
    let book = |id, title: &str, author: &str, category: &str, cover: &str| LocalBook {
        id,
        title: title.to_string(),
        author: author.to_string(),
        category: category.to_string(),
        cover: Some(cover.to_string()),
    };

    vec![
        book(
            1,
            "The Hobbit",
            "J.R.R. Tolkien",
            "Fantasy",
            "https://images.unsplash.com/photo-1544947950-fa07a98d237f?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&q=80",
        ),
        book(
            2,
            "1984",
            "George Orwell",
            "Dystopia",
            "https://images.unsplash.com/photo-1543002588-bfa74002ed7e?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&q=80",
        ),
        book(
            3,
            "Power Play Edition: First edition",
            "Rick Campbell",
            "Fiction",
            "https://images.unsplash.com/photo-1507842217343-583bb7270b66?w=800&q=80",
        ),
        book(
            4,
            "My love story",
            "Casey Howard",
            "Romance",
            "https://images.unsplash.com/photo-1501594907352-04cda38ebc29?w=800&q=80",
        ),
    ]
}
