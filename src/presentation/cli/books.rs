use anyhow::Result;
use clap::{Args, Subcommand};

use super::{FilterArgs, NewBookArgs, UpdateBookArgs, print_json};
use crate::domain::book_items::BookFilter;
use crate::domain::ids::BookId;
use crate::infrastructure::client::BookshelfClient;
use crate::presentation::views::BookCardView;

#[derive(Debug, Subcommand)]
pub enum BookCommands {
    /// Add a new book
    Add(NewBookArgs),
    /// List your books, optionally filtered
    List(FilterArgs),
    /// Get a book by ID
    Get(BookIdArgs),
    /// Update some fields of a book
    Update(UpdateBookArgs),
    /// Delete a book
    Delete(BookIdArgs),
    /// List the categories in use
    Categories,
}

#[derive(Debug, Args)]
pub struct BookIdArgs {
    #[arg(long)]
    pub id: i64,
}

pub async fn run(client: &BookshelfClient, cmd: BookCommands) -> Result<()> {
    match cmd {
        BookCommands::Add(args) => {
            let book = client.books().create(&args.into()).await?;
            print_json(&book)
        }
        BookCommands::List(args) => {
            let filter = BookFilter::new(args.search, args.category);
            let books = client.books().list(&filter).await?;
            let cards: Vec<BookCardView> = books.iter().map(BookCardView::from).collect();
            print_json(&cards)
        }
        BookCommands::Get(args) => {
            let book = client.books().get(BookId::new(args.id)).await?;
            print_json(&book)
        }
        BookCommands::Update(args) => {
            let (id, changes) = args.into_parts();
            let response = client.books().update(BookId::new(id), &changes).await?;
            print_json(&response)
        }
        BookCommands::Delete(args) => {
            let response = client.books().delete(BookId::new(args.id)).await?;
            print_json(&response)
        }
        BookCommands::Categories => {
            let categories = client.books().categories().await?;
            print_json(&categories)
        }
    }
}
