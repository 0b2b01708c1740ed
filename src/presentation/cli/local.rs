use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use serde_json::json;

use super::{FilterArgs, NewBookArgs, UpdateBookArgs, print_json};
use crate::domain::book_items::BookFilter;
use crate::infrastructure::local_library::{FileStorage, LocalLibrary, Theme};
use crate::presentation::views::BookCardView;

#[derive(Debug, Subcommand)]
pub enum LocalCommands {
    /// List books, optionally filtered
    List(FilterArgs),
    /// Add a new book
    Add(NewBookArgs),
    /// Update some fields of a book
    Update(UpdateBookArgs),
    /// Delete a book
    Delete(LocalIdArgs),
    /// List the categories in use
    Categories,
    /// Show or change the colour theme
    Theme(ThemeCommand),
}

#[derive(Debug, Args)]
pub struct LocalIdArgs {
    #[arg(long)]
    pub id: i64,
}

#[derive(Debug, Args)]
pub struct ThemeCommand {
    /// Omit to print the current theme
    #[arg(value_enum)]
    pub action: Option<ThemeAction>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeAction {
    Light,
    Dark,
    Toggle,
}

pub fn run(data_dir: &Path, cmd: LocalCommands) -> Result<()> {
    let mut library = LocalLibrary::open(FileStorage::new(data_dir))
        .with_context(|| format!("failed to open local library in {}", data_dir.display()))?;

    match cmd {
        LocalCommands::List(args) => {
            let filter = BookFilter::new(args.search, args.category);
            let cards: Vec<BookCardView> = library
                .list(&filter)
                .into_iter()
                .map(BookCardView::from)
                .collect();
            print_json(&cards)
        }
        LocalCommands::Add(args) => {
            let book = library.add(args.into())?;
            print_json(book)
        }
        LocalCommands::Update(args) => {
            let (id, changes) = args.into_parts();
            let book = library.update(id, changes)?;
            print_json(book)
        }
        LocalCommands::Delete(args) => {
            let book = library.delete(args.id)?;
            print_json(&book)
        }
        LocalCommands::Categories => print_json(&library.categories()),
        LocalCommands::Theme(command) => {
            let theme = match command.action {
                None => library.theme(),
                Some(ThemeAction::Toggle) => library.toggle_theme()?,
                Some(ThemeAction::Light) => {
                    library.set_theme(Theme::Light)?;
                    Theme::Light
                }
                Some(ThemeAction::Dark) => {
                    library.set_theme(Theme::Dark)?;
                    Theme::Dark
                }
            };
            print_json(&json!({ "theme": theme }))
        }
    }
}
