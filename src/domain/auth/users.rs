use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::UserId;

/// A stored account. Never serialized directly: the password hash must not
/// leave the server, so responses go through [`PublicUser`].
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
}

/// The fields of a user that may be returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: UserId,
    pub email: String,
    pub name: Option<String>,
}

impl User {
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}

impl NewUser {
    pub fn new(email: &str, password_hash: String, name: Option<String>) -> Self {
        Self {
            email: normalize_email(email),
            password_hash,
            name: name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
        }
    }
}

/// Emails are compared case-insensitively, so they are stored trimmed and
/// lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
