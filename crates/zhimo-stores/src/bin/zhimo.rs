//! zhimo: command line client for the zhimo document backend.
//!
//! Drives the state containers the way a UI would and prints the resulting
//! snapshots as JSON.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zhimo_client::{
    AiService, ApiClient, AuthService, ClientConfig, DocumentService, FileStorage, PollConfig,
    StatusPoller,
};
use zhimo_core::{
    defaults, DocumentQueryParams, Language, LoginRequest, ProcessingStatus, RegisterRequest,
    SummaryLength, SummaryRequest, UploadFile, UserProfile,
};
use zhimo_stores::{AuthStore, DocumentStore, KnowledgeStore, StaticKnowledgeSource};

#[derive(Parser)]
#[command(name = "zhimo")]
#[command(author, version, about = "Command line client for the zhimo document backend")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session
    Login { username: String, password: String },

    /// Create an account and store the session
    Register {
        username: String,
        email: String,
        password: String,
        /// Public display name
        display_name: Option<String>,
    },

    /// Erase the stored session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// List documents
    List {
        /// pending, processing, completed or failed
        #[arg(long)]
        status: Option<ProcessingStatus>,

        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        limit: Option<u32>,

        #[arg(long)]
        offset: Option<u32>,
    },

    /// Show one document
    Show { id: String },

    /// Print a document's markdown
    Markdown { id: String },

    /// Upload a file
    Upload {
        path: PathBuf,
        title: String,

        /// Comma separated tags
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,

        /// Wait for processing to finish
        #[arg(long)]
        wait: bool,
    },

    /// Wait for a document to finish processing
    Poll { id: String },

    /// Delete a document
    Delete { id: String },

    /// Generate a summary of a document
    Summary {
        id: String,

        /// short, medium or long
        #[arg(long, default_value = "medium")]
        length: SummaryLength,

        /// zh or en
        #[arg(long, default_value = "zh")]
        lang: Language,
    },

    /// List the knowledge elements of a document
    Knowledge { id: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let _file_guard = init_tracing();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initialize tracing with configurable output.
///
/// Environment variables:
///   LOG_FORMAT  - "json" or "text" (default: "text")
///   LOG_FILE    - path to log file (optional, enables file logging)
///   RUST_LOG    - standard env filter (default: "zhimo=info,zhimo_client=info,zhimo_stores=info")
///
/// Console output goes to stderr so stdout stays machine-readable.
fn init_tracing() -> Option<WorkerGuard> {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "zhimo=info,zhimo_client=info,zhimo_stores=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    let guard = if let Some(ref path) = log_file {
        let file_dir = Path::new(path).parent().unwrap_or(Path::new("."));
        let file_name = Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("zhimo.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(non_blocking)
                        .with_ansi(false),
                )
                .init();
        }
        Some(guard)
    } else {
        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        } else {
            registry
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
        None
    };

    info!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stderr)"),
        "Logging initialized"
    );
    guard
}

/// Services and containers wired to one transport.
struct App {
    auth: AuthStore,
    documents: DocumentStore,
    document_service: DocumentService,
    ai: AiService,
}

impl App {
    fn from_env() -> anyhow::Result<Self> {
        let storage_path = std::env::var("ZHIMO_STORAGE_PATH")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| defaults::STORAGE_PATH.to_string());
        let storage = FileStorage::open(&storage_path)
            .with_context(|| format!("Failed to open session storage at {}", storage_path))?;

        let config = ClientConfig::from_env();
        info!(base_url = %config.base_url, storage = %storage_path, "Starting zhimo client");

        let client = ApiClient::new(config, Arc::new(storage))?;
        let document_service = DocumentService::new(client.clone());

        Ok(Self {
            auth: AuthStore::new(AuthService::new(client.clone())),
            documents: DocumentStore::new(
                document_service.clone(),
                StatusPoller::new(PollConfig::from_env()),
            ),
            document_service,
            ai: AiService::new(client),
        })
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let app = App::from_env()?;

    match cli.command {
        Commands::Login { username, password } => {
            let auth = app.auth.login(&LoginRequest { username, password }).await?;
            print_json(&json!({
                "id": auth.user.id,
                "username": auth.user.username,
                "displayName": app.auth.display_name(),
            }))?;
        }
        Commands::Register {
            username,
            email,
            password,
            display_name,
        } => {
            let request = RegisterRequest {
                username,
                email,
                password,
                profile: display_name.map(|display_name| UserProfile { display_name }),
            };
            let auth = app.auth.register(&request).await?;
            print_json(&auth.user)?;
        }
        Commands::Logout => {
            app.auth.logout()?;
            print_json(&json!({"loggedOut": true}))?;
        }
        Commands::Whoami => {
            let snapshot = app.auth.snapshot();
            let user = snapshot.user.as_ref().ok_or_else(|| anyhow!("Not logged in"))?;
            print_json(&json!({
                "id": user.id,
                "username": user.username,
                "email": user.email,
                "displayName": snapshot.display_name(),
            }))?;
        }
        Commands::List {
            status,
            search,
            limit,
            offset,
        } => {
            let params = DocumentQueryParams {
                status,
                search,
                limit,
                offset,
                ..Default::default()
            };
            app.documents.fetch_documents(&params).await;
            let snapshot = app.documents.snapshot();
            if let Some(error) = snapshot.error {
                return Err(anyhow!(error));
            }
            print_json(&snapshot.documents)?;
        }
        Commands::Show { id } => {
            let document = app.documents.select_document(&id).await?;
            print_json(&document)?;
        }
        Commands::Markdown { id } => {
            let response = app.document_service.get_document_markdown(&id).await?;
            let content = response
                .into_success_data()
                .ok_or_else(|| anyhow!(defaults::MSG_MARKDOWN_FAILED))?;
            println!("{}", content.markdown);
        }
        Commands::Upload {
            path,
            title,
            tags,
            wait,
        } => {
            let file = read_upload(&path)?;
            let upload = app.documents.upload_document(file, &title, &tags).await?;
            if wait {
                // Replace the background poll with a foreground one.
                let id = upload.document.id.clone();
                app.documents.cancel_polling(&id);
                let document = poll(&app.documents, &id).await?;
                print_json(&document)?;
            } else {
                print_json(&upload)?;
            }
        }
        Commands::Poll { id } => {
            let document = poll(&app.documents, &id).await?;
            print_json(&document)?;
        }
        Commands::Delete { id } => {
            let response = app.documents.delete_document(&id).await?;
            print_json(&response)?;
        }
        Commands::Summary { id, length, lang } => {
            let request = SummaryRequest {
                length,
                language: lang,
                include_key_points: None,
            };
            let response = app.ai.generate_summary(&id, &request).await?;
            let summary = response
                .into_success_data()
                .ok_or_else(|| anyhow!(defaults::MSG_SUMMARY_FAILED))?;
            println!("{}", summary.summary);
        }
        Commands::Knowledge { id } => {
            let store = KnowledgeStore::new(StaticKnowledgeSource::sample());
            store.fetch_elements_for_document(&id).await;
            let snapshot = store.snapshot();
            if let Some(error) = snapshot.error {
                return Err(anyhow!(error));
            }
            print_json(&snapshot.elements)?;
        }
    }

    Ok(())
}

async fn poll(store: &DocumentStore, id: &str) -> anyhow::Result<zhimo_core::Document> {
    match store.poll_document_processing(id).await {
        Some(document) => Ok(document),
        None => {
            let error = store.snapshot().error;
            Err(anyhow!(error.unwrap_or_else(|| defaults::MSG_POLL_FAILED.to_string())))
        }
    }
}

/// Read a file for upload, detecting its MIME type from magic bytes first.
fn read_upload(path: &Path) -> anyhow::Result<UploadFile> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|f| f.to_str())
        .ok_or_else(|| anyhow!("Invalid file name: {}", path.display()))?
        .to_string();

    let mime_type = match infer::get(&bytes) {
        Some(kind) => kind.mime_type().to_string(),
        None => mime_from_extension(&file_name).to_string(),
    };

    Ok(UploadFile {
        file_name,
        mime_type,
        bytes,
    })
}

fn mime_from_extension(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "md" | "markdown" => "text/markdown",
        "txt" => "text/plain",
        "html" | "htm" => "text/html",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "doc" => "application/msword",
        _ => "application/octet-stream",
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
