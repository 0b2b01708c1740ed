pub mod books;
pub(crate) mod macros;
pub mod users;
