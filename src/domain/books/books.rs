use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::{BookId, UserId};

/// Shown in place of a cover image when a book has none.
pub const PLACEHOLDER_COVER: &str = "https://via.placeholder.com/300x400?text=No+Cover";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub category: String,
    pub cover: Option<String>,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    pub fn cover_or_placeholder(&self) -> &str {
        cover_or_placeholder(self.cover.as_deref())
    }
}

pub fn cover_or_placeholder(cover: Option<&str>) -> &str {
    cover.filter(|c| !c.trim().is_empty()).unwrap_or(PLACEHOLDER_COVER)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
}

impl NewBook {
    pub fn normalize(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.author = self.author.trim().to_string();
        self.category = self.category.trim().to_string();
        self.cover = normalize_optional_field(self.cover);
        self
    }

    /// Name of the first required field that is blank, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("title", &self.title),
            ("author", &self.author),
            ("category", &self.category),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }
}

/// A partial update. Only these four fields are patchable; `id` and
/// `owner_id` are fixed at creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBook {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// `None` = don't change, `Some(None)` = clear, `Some(Some(url))` = set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<Option<String>>,
}

impl UpdateBook {
    pub fn normalize(mut self) -> Self {
        self.title = self.title.map(|t| t.trim().to_string());
        self.author = self.author.map(|a| a.trim().to_string());
        self.category = self.category.map(|c| c.trim().to_string());
        self.cover = self.cover.map(normalize_optional_field);
        self
    }

    pub fn has_changes(&self) -> bool {
        self.title.is_some()
            || self.author.is_some()
            || self.category.is_some()
            || self.cover.is_some()
    }

    /// Name of the first provided required field that is blank, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("title", self.title.as_deref()),
            ("author", self.author.as_deref()),
            ("category", self.category.as_deref()),
        ]
        .into_iter()
        .find(|(_, value)| value.is_some_and(|v| v.trim().is_empty()))
        .map(|(name, _)| name)
    }
}

/// Search and category constraints for listing books. Both compose with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl BookFilter {
    pub fn new(search: Option<String>, category: Option<String>) -> Self {
        Self {
            search: normalize_optional_field(search),
            category: normalize_optional_field(category),
        }
    }

    /// Case-insensitive substring match of the search term against title or
    /// author, and exact match on category.
    pub fn matches(&self, title: &str, author: &str, category: &str) -> bool {
        let matches_term = self.search.as_deref().is_none_or(|term| {
            let term = term.to_lowercase();
            title.to_lowercase().contains(&term) || author.to_lowercase().contains(&term)
        });
        let matches_category = self.category.as_deref().is_none_or(|c| c == category);
        matches_term && matches_category
    }
}

fn normalize_optional_field(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Sorted, de-duplicated category names for a category filter.
pub fn distinct_categories<'a>(categories: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut names: Vec<String> = categories.into_iter().map(String::from).collect();
    names.sort();
    names.dedup();
    names
}
