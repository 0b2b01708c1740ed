pub mod auth;
pub mod books;
pub mod errors;
pub mod ids;
pub mod messages;
pub mod repositories;

// Re-exports
pub use auth::{tokens, users};
pub use books::books as book_items;
pub use errors::RepositoryError;
