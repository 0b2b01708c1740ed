use anyhow::Result;
use bookshelf::application::{ServerConfig, serve};
use bookshelf::infrastructure::client::BookshelfClient;
use bookshelf::presentation::cli::{Cli, Commands, ServeCommand, auth, books, local};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before clap parses env vars)
    let _ = dotenvy::dotenv();

    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(cmd) => run_server(cmd).await,
        Commands::Register(cmd) => {
            let client = BookshelfClient::from_base_url(&cli.api_url, cli.token)?;
            auth::register(&client, cmd).await
        }
        Commands::Login(cmd) => {
            let client = BookshelfClient::from_base_url(&cli.api_url, cli.token)?;
            auth::login(&client, cmd).await
        }
        Commands::Book { command } => {
            let client = BookshelfClient::from_base_url(&cli.api_url, cli.token)?;
            books::run(&client, command).await
        }
        Commands::Local { data_dir, command } => local::run(&data_dir, command),
    }
}

async fn run_server(command: ServeCommand) -> Result<()> {
    if command.token_ttl_hours <= 0 {
        anyhow::bail!("BOOKSHELF_TOKEN_TTL_HOURS must be positive");
    }

    let config = ServerConfig {
        bind_address: command.bind_address,
        database_url: command.database_url,
        token_secret: command.token_secret,
        token_ttl: chrono::Duration::hours(command.token_ttl_hours),
        allowed_origin: command.allowed_origin,
    };

    serve(config).await
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("RUST_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    // Logs go to stderr so command output on stdout stays machine-readable.
    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
