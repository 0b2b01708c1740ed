mod auth;
mod books;

pub use auth::AuthService;
pub use books::BookService;
