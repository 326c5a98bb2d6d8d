//! # ragdoc CLI
//!
//! Command-line client for a RAG document Q&A service.
//!
//! ## Usage
//!
//! ```bash
//! # Store a session token
//! ragdoc login --token tok_abc123
//!
//! # Upload and process a document
//! ragdoc document upload manual.pdf
//! ragdoc document chunk doc_abc123
//! ragdoc document vectorize doc_abc123
//! ragdoc document confirm doc_abc123
//!
//! # Ask questions
//! ragdoc ask "What does the manual say about storage?"
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use ragdoc::commands;
use ragdoc::errors::display_error;
use ragdoc::exit_codes::EXIT_ERROR;

/// Initialize logger based on verbose flag
fn init_logger(verbose: bool) {
    let mut log_builder = env_logger::Builder::from_default_env();
    if verbose {
        log_builder.filter_level(log::LevelFilter::Debug);
    } else {
        log_builder.filter_level(log::LevelFilter::Info);
    }
    log_builder.init();
}

/// Main CLI structure
#[derive(Parser)]
#[command(name = "ragdoc")]
#[command(about = "Command-line client for a RAG document Q&A service", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
enum Commands {
    /// Store a session token issued by the login surface
    Login {
        /// The session token to store
        #[arg(long, value_name = "TOKEN")]
        token: String,
        /// Base URL of the backend (stored alongside the token)
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
    },
    /// Remove the stored session token
    Logout,
    /// Ask a question over the document corpus
    Ask {
        /// Natural language question
        #[arg(value_name = "QUESTION")]
        question: String,
        /// Number of chunks to retrieve (1-20)
        #[arg(long, value_name = "COUNT")]
        top_k: Option<i32>,
        /// Do not return source chunks with the answer
        #[arg(long)]
        no_sources: bool,
        /// Custom system prompt
        #[arg(long, value_name = "PROMPT")]
        system_prompt: Option<String>,
        /// Apply a rerank pass to the retrieved candidates
        #[arg(long)]
        rerank: bool,
        /// Restrict retrieval to one document
        #[arg(long, value_name = "DOCUMENT_ID")]
        document: Option<String>,
        /// Minimum similarity score (0.0-1.0)
        #[arg(long, value_name = "THRESHOLD")]
        threshold: Option<f64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Inspect or switch the active model
    Model {
        #[command(subcommand)]
        command: ModelCommands,
    },
    /// Inspect or clear the server-side retrieval cache
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
    /// Manage documents and the processing pipeline
    Document {
        #[command(subcommand)]
        command: DocumentCommands,
    },
    /// Browse and manage stored collections
    Collection {
        #[command(subcommand)]
        command: CollectionCommands,
    },
    /// Admin operations on usage limits and counters
    Usage {
        #[command(subcommand)]
        command: UsageCommands,
    },
}

/// Model subcommands
#[derive(Subcommand)]
enum ModelCommands {
    /// Show the active model
    Info {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Switch the active model provider
    Switch {
        /// Provider name (e.g., deepseek, qwen)
        #[arg(value_name = "PROVIDER")]
        provider: String,
        /// Sampling temperature (0.0-2.0)
        #[arg(long, value_name = "TEMPERATURE")]
        temperature: Option<f64>,
    },
}

/// Cache subcommands
#[derive(Subcommand)]
enum CacheCommands {
    /// Show retrieval cache statistics
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Clear the retrieval cache
    Clear {
        /// Only clear entries for one document
        #[arg(long, value_name = "DOCUMENT_ID")]
        document: Option<String>,
    },
}

/// Document subcommands
#[derive(Subcommand)]
enum DocumentCommands {
    /// Upload a document file
    Upload {
        /// File to upload
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List all documents
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show metadata for one document
    Show {
        /// Document ID
        #[arg(value_name = "DOCUMENT_ID")]
        document_id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a document
    Delete {
        /// Document ID
        #[arg(value_name = "DOCUMENT_ID")]
        document_id: String,
    },
    /// Split a document into chunks
    Chunk {
        /// Document ID
        #[arg(value_name = "DOCUMENT_ID")]
        document_id: String,
        /// Chunk size in characters (100-2000, default 500)
        #[arg(long, value_name = "SIZE")]
        chunk_size: Option<u32>,
        /// Overlap between chunks in characters (0-500, default 50)
        #[arg(long, value_name = "OVERLAP")]
        overlap: Option<u32>,
        /// Preferred split separator
        #[arg(long, value_name = "SEPARATOR")]
        separator: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Embed a document's chunks
    Vectorize {
        /// Document ID
        #[arg(value_name = "DOCUMENT_ID")]
        document_id: String,
    },
    /// Run a retrieval test against one document
    Search {
        /// Document ID
        #[arg(value_name = "DOCUMENT_ID")]
        document_id: String,
        /// Search question
        #[arg(value_name = "QUERY")]
        query: String,
        /// Number of results to return (1-20)
        #[arg(long, value_name = "COUNT")]
        top_k: Option<i32>,
        /// Apply a rerank pass to the candidates
        #[arg(long)]
        rerank: bool,
        /// Minimum similarity score (0.0-1.0)
        #[arg(long, value_name = "THRESHOLD")]
        threshold: Option<f64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Promote staged vectors to permanent storage
    Confirm {
        /// Document ID
        #[arg(value_name = "DOCUMENT_ID")]
        document_id: String,
    },
    /// Read a permanently stored document page by page
    Content {
        /// Document ID
        #[arg(value_name = "DOCUMENT_ID")]
        document_id: String,
        /// Page number, starting at 1
        #[arg(long, default_value = "1")]
        page: u32,
        /// Chunks per page (1-100)
        #[arg(long, default_value = "10")]
        page_size: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Collection subcommands
#[derive(Subcommand)]
enum CollectionCommands {
    /// List all stored collections
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Page through one collection's chunks
    Show {
        /// Document ID the collection was built from
        #[arg(value_name = "DOCUMENT_ID")]
        document_id: String,
        /// Page number, starting at 1
        #[arg(long, default_value = "1")]
        page: u32,
        /// Chunks per page (1-50)
        #[arg(long, default_value = "10")]
        page_size: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a stored collection
    Delete {
        /// Document ID the collection was built from
        #[arg(value_name = "DOCUMENT_ID")]
        document_id: String,
    },
}

/// Usage subcommands
#[derive(Subcommand)]
enum UsageCommands {
    /// Update the global upload and query limits
    SetLimits {
        /// New daily upload limit
        #[arg(long, value_name = "COUNT")]
        upload: i64,
        /// New daily query limit
        #[arg(long, value_name = "COUNT")]
        query: i64,
        /// Admin password authorizing the change
        #[arg(long, value_name = "PASSWORD")]
        admin_password: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Reset a user's usage counters for today
    Reset {
        /// Admin password authorizing the reset
        #[arg(long, value_name = "PASSWORD")]
        admin_password: String,
        /// User to reset; omit to reset your own usage
        #[arg(long, value_name = "USER_ID")]
        user: Option<i64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let result = match cli.command {
        Commands::Login { token, base_url } => commands::login::execute(token, base_url).await,
        Commands::Logout => commands::login::logout().await,
        Commands::Ask {
            question,
            top_k,
            no_sources,
            system_prompt,
            rerank,
            document,
            threshold,
            json,
        } => {
            commands::ask::execute(commands::ask::AskArgs {
                question,
                top_k,
                no_sources,
                system_prompt,
                rerank,
                document,
                threshold,
                json,
            })
            .await
        }
        Commands::Model { command } => match command {
            ModelCommands::Info { json } => commands::model::info(json).await,
            ModelCommands::Switch {
                provider,
                temperature,
            } => commands::model::switch(provider, temperature).await,
        },
        Commands::Cache { command } => match command {
            CacheCommands::Stats { json } => commands::cache::stats(json).await,
            CacheCommands::Clear { document } => commands::cache::clear(document).await,
        },
        Commands::Document { command } => match command {
            DocumentCommands::Upload { file, json } => commands::document::upload(file, json).await,
            DocumentCommands::List { json } => commands::document::list(json).await,
            DocumentCommands::Show { document_id, json } => {
                commands::document::show(document_id, json).await
            }
            DocumentCommands::Delete { document_id } => {
                commands::document::delete(document_id).await
            }
            DocumentCommands::Chunk {
                document_id,
                chunk_size,
                overlap,
                separator,
                json,
            } => commands::document::chunk(document_id, chunk_size, overlap, separator, json).await,
            DocumentCommands::Vectorize { document_id } => {
                commands::document::vectorize(document_id).await
            }
            DocumentCommands::Search {
                document_id,
                query,
                top_k,
                rerank,
                threshold,
                json,
            } => commands::document::search(document_id, query, top_k, rerank, threshold, json).await,
            DocumentCommands::Confirm { document_id } => {
                commands::document::confirm(document_id).await
            }
            DocumentCommands::Content {
                document_id,
                page,
                page_size,
                json,
            } => commands::document::content(document_id, page, page_size, json).await,
        },
        Commands::Collection { command } => match command {
            CollectionCommands::List { json } => commands::collection::list(json).await,
            CollectionCommands::Show {
                document_id,
                page,
                page_size,
                json,
            } => commands::collection::show(document_id, page, page_size, json).await,
            CollectionCommands::Delete { document_id } => {
                commands::collection::delete(document_id).await
            }
        },
        Commands::Usage { command } => match command {
            UsageCommands::SetLimits {
                upload,
                query,
                admin_password,
                json,
            } => commands::usage::set_limits(upload, query, admin_password, json).await,
            UsageCommands::Reset {
                admin_password,
                user,
                json,
            } => commands::usage::reset(admin_password, user, json).await,
        },
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            display_error(&format!("{e:#}"));
            std::process::exit(EXIT_ERROR);
        }
    }
}
