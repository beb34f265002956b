mod board;
mod config;
mod models;
mod pipeline;
mod scrapers;
mod webhook;

use anyhow::{Context, Result};
use board::TrelloClient;
use clap::{Parser, Subcommand};
use config::Config;
use pipeline::Pipeline;
use scrapers::{build_client, FundaClient, ListingSite};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use webhook::WebhookState;

#[derive(Parser)]
#[command(author, version, about = "Enriches property cards on a Trello board with Funda listings")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Listen for board webhooks (default)
    Serve,
    /// Populate every card on the configured board once, then exit
    PopulateBoard,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    let client = build_client()?;
    let site = FundaClient::with_endpoints(client.clone(), config.site.clone());
    let board = TrelloClient::new(
        client,
        config.trello_api_url.clone(),
        config.trello_key.clone(),
        config.trello_token.clone(),
    );
    info!("🏠 Using {} listings", site.source_name());

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config, site, board).await,
        Command::PopulateBoard => populate_board(config, site, board).await,
    }
}

async fn serve(config: Config, site: FundaClient, board: TrelloClient) -> Result<()> {
    let viewing_list_id = config
        .viewing_list_id
        .context("VIEWING_LIST_ID must be set")?;
    let viewing = config
        .viewing
        .context("VIEWING_FIRST_NAME and the other viewing details must be set")?;

    let app = webhook::router(WebhookState {
        pipeline: Pipeline::new(Arc::new(site), Arc::new(board), viewing),
        viewing_list_id: Arc::from(viewing_list_id),
    });

    let addr = format!("0.0.0.0:{}", config.port);
    info!("Listening for webhooks on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

async fn populate_board(config: Config, site: FundaClient, board: TrelloClient) -> Result<()> {
    let board_id = config.board_id.context("TRELLO_BOARD_ID must be set")?;
    let pipeline = Pipeline::new(
        Arc::new(site),
        Arc::new(board),
        config.viewing.unwrap_or_default(),
    );

    let visited = pipeline.populate_board(&board_id).await?;
    info!("✅ Visited {} cards", visited);

    Ok(())
}
