pub mod auth;
pub mod books;
pub mod local;

use std::net::SocketAddr;
use std::path::PathBuf;

use auth::{LoginCommand, RegisterCommand};
use books::BookCommands;
use clap::{Args, Parser, Subcommand};
use local::LocalCommands;

use crate::domain::book_items::{NewBook, UpdateBook};

#[derive(Debug, Parser)]
#[command(author, version, about = "Keep a personal library of books", long_about = None)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "BOOKSHELF_URL",
        default_value = "http://localhost:3001"
    )]
    pub api_url: String,

    /// Bearer token returned by `register` or `login`
    #[arg(long, global = true, env = "BOOKSHELF_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeCommand),

    /// Create an account and print its session token
    Register(RegisterCommand),

    /// Log in and print a session token
    Login(LoginCommand),

    /// Manage books through the API
    Book {
        #[command(subcommand)]
        command: BookCommands,
    },

    /// Manage a local library without a server
    Local {
        #[arg(long, env = "BOOKSHELF_DATA_DIR", default_value = ".bookshelf")]
        data_dir: PathBuf,

        #[command(subcommand)]
        command: LocalCommands,
    },
}

#[derive(Debug, Args)]
pub struct ServeCommand {
    #[arg(
        long,
        env = "BOOKSHELF_DATABASE_URL",
        default_value = "sqlite://bookshelf.db"
    )]
    pub database_url: String,

    #[arg(long, env = "BOOKSHELF_BIND_ADDRESS", default_value = "127.0.0.1:3001")]
    pub bind_address: SocketAddr,

    #[arg(long, env = "BOOKSHELF_TOKEN_SECRET", hide_env_values = true)]
    pub token_secret: String,

    #[arg(long, env = "BOOKSHELF_TOKEN_TTL_HOURS", default_value_t = 168)]
    pub token_ttl_hours: i64,

    /// Browser origin allowed to call the API cross-origin
    #[arg(long, env = "BOOKSHELF_ALLOWED_ORIGIN")]
    pub allowed_origin: Option<String>,
}

#[derive(Debug, Args)]
pub struct NewBookArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub author: String,
    #[arg(long)]
    pub category: String,
    #[arg(long)]
    pub cover: Option<String>,
}

impl From<NewBookArgs> for NewBook {
    fn from(args: NewBookArgs) -> Self {
        NewBook {
            title: args.title,
            author: args.author,
            category: args.category,
            cover: args.cover,
        }
    }
}

#[derive(Debug, Args)]
pub struct UpdateBookArgs {
    #[arg(long)]
    pub id: i64,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub author: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long, conflicts_with = "clear_cover")]
    pub cover: Option<String>,
    /// Remove the cover image
    #[arg(long)]
    pub clear_cover: bool,
}

impl UpdateBookArgs {
    pub fn into_parts(self) -> (i64, UpdateBook) {
        let cover = if self.clear_cover {
            Some(None)
        } else {
            self.cover.map(Some)
        };

        (
            self.id,
            UpdateBook {
                title: self.title,
                author: self.author,
                category: self.category,
                cover,
            },
        )
    }
}

#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Case-insensitive match on title or author
    #[arg(long)]
    pub search: Option<String>,
    /// Exact category name
    #[arg(long)]
    pub category: Option<String>,
}

pub(crate) fn print_json<T>(value: &T) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
