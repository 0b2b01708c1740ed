mod books_cli;
mod helpers;
