mod chat;
mod config;
mod gemini;
mod ingest;
mod knowledge;
mod lang;
mod pipeline;
mod retrieval;
mod routing;
mod status;
mod synthesis;
mod translate;

pub const USER_AGENT: &str = concat!("campusbot/", env!("CARGO_PKG_VERSION"));

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use reqwest::Client;
use tracing::{error, info, warn};

use config::Settings;
use gemini::GeminiClient;
use knowledge::KnowledgeBase;
use pipeline::Pipeline;
use retrieval::Retriever;
use routing::{KeywordClassifier, Roster};
use status::{LiveStatusResolver, StatusClient};
use synthesis::Synthesizer;
use translate::{GoogleTranslator, TranslationBoundary};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const HTTP_TIMEOUT: Duration = Duration::from_secs(60);

/// Bilingual (English/Gujarati) campus assistant.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive question loop on stdin/stdout (default)
    Chat,
    /// Embed a knowledge-base export into documents with vectors
    Embed {
        #[arg(long, default_value = "data/knowledge_base.json")]
        input: PathBuf,
        #[arg(long, default_value = "data/knowledge_base_embeddings.json")]
        output: PathBuf,
    },
    /// Build the vector index from embedded documents
    Index {
        #[arg(long, default_value = "data/knowledge_base_embeddings.json")]
        input: PathBuf,
        #[arg(long, default_value = "data/knowledge_index.json")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("campusbot=warn".parse()?),
        )
        .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Chat) {
        Command::Chat => chat_session().await,
        Command::Embed { input, output } => {
            let gemini = GeminiClient::from_env(http_client()?)?;
            let written = ingest::embed_file(&gemini, &input, &output)
                .await
                .inspect_err(|e| error!("embedding failed: {e}"))?;
            println!("Embedded {written} documents into {}", output.display());
            Ok(())
        }
        Command::Index { input, output } => {
            let rows = ingest::index_file(&input, &output)
                .inspect_err(|e| error!("indexing failed: {e}"))?;
            println!("Indexed {rows} documents into {}", output.display());
            Ok(())
        }
    }
}

fn http_client() -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(HTTP_TIMEOUT)
        .build()
}

async fn chat_session() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;
    let http = http_client()?;
    let gemini = GeminiClient::from_env(http.clone())
        .inspect_err(|e| error!("Gemini client not available: {e}"))?;

    let roster = match &settings.roster_path {
        Some(path) => Roster::load(path)
            .inspect_err(|e| error!("cannot read roster {}: {e}", path.display()))?,
        None => Roster::default(),
    };
    if roster.is_empty() {
        warn!("faculty roster is empty; live-status questions will ask for a name");
    }
    let knowledge = KnowledgeBase::load(&settings.index_path, &settings.documents_path)
        .inspect_err(|e| error!("knowledge base not available: {e}"))?;
    info!(
        faculty = roster.len(),
        documents = knowledge.len(),
        status_url = %settings.status_url,
        "starting chat session"
    );

    let pipeline = Pipeline::new(
        KeywordClassifier::new(roster),
        Retriever::new(gemini.clone(), &knowledge),
        Synthesizer::new(gemini),
        TranslationBoundary::new(GoogleTranslator::new(http.clone())),
        LiveStatusResolver::new(StatusClient::new(http, &settings.status_url)),
    )
    .with_top_k(settings.top_k);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    chat::run(&pipeline, stdin, tokio::io::stdout()).await?;
    info!("chat session ended");
    Ok(())
}
