pub mod auth;
pub mod client;
pub mod database;
pub mod local_library;
pub mod repositories;
