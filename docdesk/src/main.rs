use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docdesk::config::Config;
use docdesk::db::{DocumentStore, JsonlDocumentStore};
use docdesk::models::{Department, SourceDocument, UploadForm};
use docdesk::processing::{TextExtractionService, UploadPipeline};
use docdesk::services::Assistant;

#[derive(Parser)]
#[command(name = "docdesk")]
#[command(about = "Document intake for the enterprise document desk")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract text from a PDF or image
    Extract {
        path: PathBuf,
        /// Media type to use instead of guessing from the file
        #[arg(long)]
        mime: Option<String>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Upload a document: extract its text and store its metadata record
    Upload {
        path: PathBuf,
        #[arg(long)]
        title: String,
        #[arg(long)]
        department: Department,
        #[arg(long, default_value = "")]
        description: String,
        /// 1 (Low) to 5 (Critical)
        #[arg(long, default_value_t = 1)]
        priority: u8,
        #[arg(long)]
        uploaded_by: String,
        #[arg(long)]
        mime: Option<String>,
    },
    /// Search stored documents by title, description or department
    Search {
        query: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Ask the document assistant
    Ask { message: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docdesk=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();

    let extraction = Arc::new(TextExtractionService::from_config(&config.ocr));
    let store: Arc<dyn DocumentStore> =
        Arc::new(JsonlDocumentStore::new(config.storage.path.clone()));

    let cancel_token = CancellationToken::new();
    tokio::spawn(shutdown_signal(cancel_token.clone()));

    let outcome = tokio::select! {
        result = run(args.command, &config, Arc::clone(&extraction), store) => result,
        _ = cancel_token.cancelled() => {
            Err(anyhow::anyhow!("Interrupted"))
        }
    };

    extraction.cleanup().await;
    outcome
}

async fn run(
    command: Command,
    config: &Config,
    extraction: Arc<TextExtractionService>,
    store: Arc<dyn DocumentStore>,
) -> anyhow::Result<()> {
    match command {
        Command::Extract { path, mime, json } => {
            let file = SourceDocument::from_path(&path, mime.as_deref()).await?;
            let result = extraction.extract_text(&file).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", result.text);
                eprintln!("confidence: {:.1}", result.confidence);
            }
        }
        Command::Upload {
            path,
            title,
            department,
            description,
            priority,
            uploaded_by,
            mime,
        } => {
            let file = SourceDocument::from_path(&path, mime.as_deref()).await?;
            let form = UploadForm::new(title, department, uploaded_by)
                .with_description(description)
                .with_priority(priority);
            let pipeline = UploadPipeline::new(extraction, store);
            let record = pipeline.submit(form, &file).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Command::Search { query, limit } => {
            let limit = limit.unwrap_or(config.storage.search_limit);
            let records = store.search(&query, limit).await?;
            if records.is_empty() {
                println!("No documents found.");
            }
            for record in records {
                println!(
                    "{}  {}  [{} | {} | {}]",
                    record.id,
                    record.title,
                    record.department,
                    record.priority_label(),
                    record.status
                );
            }
        }
        Command::Ask { message } => {
            let assistant = Assistant::new(store, config.storage.search_limit);
            println!("{}", assistant.reply(&message).await);
        }
    }
    Ok(())
}

async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, releasing extraction resources...");
    cancel_token.cancel();
}
