//! # Ask Command
//!
//! Implements the ask command for querying the document corpus.
//!
//! ## Usage
//!
//! ```bash
//! # Ask a question over the whole corpus
//! ragdoc ask "What does the safety manual say about storage?"
//!
//! # Scope to one document, retrieve more chunks, rerank
//! ragdoc ask "What changed in v2?" --document doc_abc123 --top-k 10 --rerank
//!
//! # Raw JSON output
//! ragdoc ask "Summarize chapter 1" --json
//! ```

use anyhow::Result;
use colored::Colorize;

use crate::api::chat::RagQueryRequest;
use crate::commands::{api_error_exit, connect, guard_route, print_json};
use crate::exit_codes::*;
use crate::router;

/// Arguments for the ask command
#[derive(Debug)]
pub struct AskArgs {
    /// The question to ask
    pub question: String,
    /// Number of chunks to retrieve (1-20)
    pub top_k: Option<i32>,
    /// Suppress source chunks in the answer
    pub no_sources: bool,
    /// Custom system prompt
    pub system_prompt: Option<String>,
    /// Apply a rerank pass to the retrieved candidates
    pub rerank: bool,
    /// Restrict retrieval to one document
    pub document: Option<String>,
    /// Minimum similarity score (0.0-1.0)
    pub threshold: Option<f64>,
    /// Output raw JSON
    pub json: bool,
}

/// Execute the ask command
///
/// # Returns
///
/// * `Ok(EXIT_SUCCESS)` - Answer received
/// * `Ok(EXIT_AUTH_ERROR)` - Not logged in or session expired
/// * `Ok(EXIT_NETWORK_ERROR)` - Cannot reach the API
pub async fn execute(args: AskArgs) -> Result<i32> {
    let (client, store) = connect()?;
    if let Some(code) = guard_route(&store, router::RAG_QA_PATH) {
        return Ok(code);
    }

    let mut request = RagQueryRequest {
        question: args.question,
        ..Default::default()
    };
    if let Some(top_k) = args.top_k {
        request.top_k = top_k;
    }
    request.return_sources = !args.no_sources;
    request.use_rerank = args.rerank;
    request.system_prompt = args.system_prompt;
    request.document_id = args.document;
    request.threshold = args.threshold;

    let response = match client.query_rag(&request).await {
        Ok(response) => response,
        Err(e) => return Ok(api_error_exit(&e)),
    };

    if args.json {
        return print_json(&response);
    }

    println!("{}", response.answer);

    if !response.sources.is_empty() {
        println!();
        println!("{}", "Sources:".bold());
        for (i, source) in response.sources.iter().enumerate() {
            let preview: String = source
                .content
                .as_deref()
                .unwrap_or("")
                .chars()
                .take(120)
                .collect();
            match source.score {
                Some(score) => println!("  {}. {} {}", i + 1, preview, format!("({:.2})", score).dimmed()),
                None => println!("  {}. {}", i + 1, preview),
            }
        }
    }

    Ok(EXIT_SUCCESS)
}
