//! placeholder-store - fetch users and posts and print them as JSON
//!
//! `users`, `posts` and `search` go through the store actor, the same path
//! an event-driven UI would use. `user` and `post` call the accessors
//! directly because the store keeps no single records.

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use placeholder_store::constants::LOG_FILE_NAME;
use placeholder_store::{
    ApiClient, ApiStore, Config, StateField, StoreActor, StoreCommand, StoreEvent, StoreState,
};

#[derive(Debug, Parser)]
#[command(name = "placeholder-store", version, about)]
struct Cli {
    /// Override the API host
    #[arg(long, env = "PLACEHOLDER_BASE_URL")]
    base_url: Option<String>,

    /// Config file (defaults to ~/.placeholder-store/config.yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List all users
    Users,
    /// List all posts
    Posts,
    /// Show one user
    User { id: u64 },
    /// Show one post
    Post { id: u64 },
    /// Search posts by title substring
    Search {
        #[arg(num_args = 0..)]
        query: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file; stdout carries command output
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE_NAME);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(Config::default_path);
    let config = Config::load(&config_path)?.with_base_url(cli.base_url);
    tracing::info!(base_url = %config.base_url, "Starting");

    let store = ApiStore::new(ApiClient::from_config(&config));

    match cli.command {
        Command::User { id } => print_json(&store.client().fetch_user(id).await?),
        Command::Post { id } => print_json(&store.client().fetch_post(id).await?),
        Command::Users => {
            let state = run_command(&store, StoreCommand::FetchUsers { id: 1 }).await?;
            print_json(&state.users)
        }
        Command::Posts => {
            let state = run_command(&store, StoreCommand::FetchPosts { id: 1 }).await?;
            print_json(&state.posts)
        }
        Command::Search { query } => {
            let query = query.join(" ");
            let state = run_command(&store, StoreCommand::SearchPosts { id: 1, query }).await?;
            print_json(&state.searched_posts)
        }
    }
}

/// Send one command through the store actor and wait for its outcome
async fn run_command(store: &ApiStore, command: StoreCommand) -> anyhow::Result<StoreState> {
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<StoreCommand>();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<StoreEvent>();

    let actor = StoreActor::new(store.clone(), event_tx);
    let handle = tokio::spawn(actor.run(cmd_rx));

    cmd_tx.send(command)?;
    let event = event_rx
        .recv()
        .await
        .context("Store actor stopped before replying")?;

    let _ = cmd_tx.send(StoreCommand::Shutdown);
    handle.await?;

    match event {
        StoreEvent::Updated { field, .. } => {
            tracing::debug!(?field, "State updated");
            Ok(store.snapshot())
        }
        StoreEvent::Failed { field, message, .. } => Err(anyhow!(
            "Failed to refresh {}: {}",
            field_label(field),
            message
        )),
    }
}

fn field_label(field: StateField) -> &'static str {
    match field {
        StateField::Users => "users",
        StateField::Posts => "posts",
        StateField::SearchedPosts => "search results",
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
