use anyhow::Result;
use clap::Args;

use super::print_json;
use crate::infrastructure::client::BookshelfClient;

#[derive(Debug, Args)]
pub struct RegisterCommand {
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "BOOKSHELF_PASSWORD", hide_env_values = true)]
    pub password: String,
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Debug, Args)]
pub struct LoginCommand {
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "BOOKSHELF_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn register(client: &BookshelfClient, command: RegisterCommand) -> Result<()> {
    let session = client
        .auth()
        .register(&command.email, &command.password, command.name.as_deref())
        .await?;
    print_json(&session)
}

pub async fn login(client: &BookshelfClient, command: LoginCommand) -> Result<()> {
    let session = client
        .auth()
        .login(&command.email, &command.password)
        .await?;
    print_json(&session)
}
