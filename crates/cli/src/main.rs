use anyhow::{Context as AnyhowContext, Result};
use clap::{Parser, Subcommand};
use ragbot_retrieval::{
    share_index, ChatResponder, Config, CorpusBootstrapper, OpenAiClient, OpenAiConfig,
    RetrievalService,
};
use ragbot_vector_index::IndexStore;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "ragbot")]
#[command(about = "Retrieval-augmented chat over a seeded passage corpus", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Embed the configured seed corpus and persist the index
    Bootstrap,

    /// Retrieve the passages most similar to a query
    Query {
        /// Query text
        text: String,

        /// Number of passages to retrieve
        #[arg(long)]
        top_k: Option<usize>,
    },

    /// Answer a message using retrieved passages as context
    Chat {
        /// User message
        text: String,
    },

    /// Show the persisted index location, dimension, and size
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();

    let config = Config::from_env().context("Invalid configuration")?;

    match cli.command {
        Commands::Bootstrap => bootstrap(&config).await,
        Commands::Query { text, top_k } => query(&config, &text, top_k).await,
        Commands::Chat { text } => chat(&config, &text).await,
        Commands::Status => status(&config).await,
    }
}

fn openai_client() -> Result<Arc<OpenAiClient>> {
    let openai = OpenAiConfig::from_env().context("Invalid provider configuration")?;
    let client = OpenAiClient::new(openai).context("Failed to build OpenAI client")?;
    Ok(Arc::new(client))
}

async fn bootstrap(config: &Config) -> Result<()> {
    let client = openai_client()?;
    let bootstrapper = CorpusBootstrapper::new(
        IndexStore::new(&config.index_path),
        client,
        config.dimension,
    );
    let index = bootstrapper
        .bootstrap(&config.seed_texts)
        .await
        .context("Bootstrap failed")?;

    println!(
        "Indexed {} passages at {}",
        index.len(),
        config.index_path.display()
    );
    Ok(())
}

async fn query(config: &Config, text: &str, top_k: Option<usize>) -> Result<()> {
    let client = openai_client()?;
    let index = IndexStore::new(&config.index_path)
        .load(config.dimension)
        .await
        .context("Failed to load index")?;

    let service = RetrievalService::new(share_index(index), client);
    let texts = service.retrieve(text, top_k.unwrap_or(config.top_k)).await;

    if texts.is_empty() {
        println!("No matching passages.");
    }
    for (rank, passage) in texts.iter().enumerate() {
        println!("{}. {}", rank + 1, passage);
    }
    Ok(())
}

async fn chat(config: &Config, text: &str) -> Result<()> {
    let client = openai_client()?;
    let index = IndexStore::new(&config.index_path)
        .load(config.dimension)
        .await
        .context("Failed to load index")?;

    let service = RetrievalService::new(share_index(index), client.clone());
    let responder = ChatResponder::new(service, client, config.top_k);

    println!("{}", responder.respond(text).await);
    Ok(())
}

async fn status(config: &Config) -> Result<()> {
    let index = IndexStore::new(&config.index_path)
        .load(config.dimension)
        .await
        .context("Failed to load index")?;

    println!("Index path: {}", config.index_path.display());
    println!("Dimension:  {}", index.dimension());
    println!("Passages:   {}", index.len());
    Ok(())
}
