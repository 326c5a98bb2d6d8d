//! # Document Commands
//!
//! The document pipeline: upload, chunk, vectorize, search, confirm, plus
//! listing, detail, deletion and reading the permanently stored content.
//!
//! ## Usage
//!
//! ```bash
//! ragdoc document upload manual.pdf
//! ragdoc document chunk doc_abc123 --chunk-size 800 --overlap 100
//! ragdoc document vectorize doc_abc123
//! ragdoc document search doc_abc123 "storage temperature" --top-k 10
//! ragdoc document confirm doc_abc123
//! ragdoc document content doc_abc123 --page 2
//! ```

use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

use crate::api::document::{ChunkConfig, SearchRequest};
use crate::commands::{api_error_exit, connect, guard_route, print_json};
use crate::errors::{display_error, display_info, display_success};
use crate::exit_codes::*;
use crate::router;

/// Execute `document upload`
///
/// Reads the file and submits it as multipart form data.
///
/// # Returns
///
/// * `Ok(EXIT_SUCCESS)` - Document accepted by the server
/// * `Ok(EXIT_INVALID_INPUT)` - File could not be read
pub async fn upload(file: PathBuf, json: bool) -> Result<i32> {
    let (client, store) = connect()?;
    if let Some(code) = guard_route(&store, router::DOCUMENT_CHUNKING_PATH) {
        return Ok(code);
    }

    let contents = match std::fs::read(&file) {
        Ok(bytes) => bytes,
        Err(e) => {
            display_error(&format!("Cannot read {}: {}", file.display(), e));
            return Ok(EXIT_INVALID_INPUT);
        }
    };
    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document")
        .to_string();

    display_info(&format!("Uploading {}...", file_name));

    match client.upload_document(&file_name, contents).await {
        Ok(info) => {
            if json {
                return print_json(&info);
            }
            match info.document_id {
                Some(id) => display_success(&format!("Uploaded {} as {}", file_name, id)),
                None => display_success(&format!("Uploaded {}", file_name)),
            }
            Ok(EXIT_SUCCESS)
        }
        Err(e) => Ok(api_error_exit(&e)),
    }
}

/// Execute `document list`
pub async fn list(json: bool) -> Result<i32> {
    let (client, store) = connect()?;
    if let Some(code) = guard_route(&store, router::DOCUMENT_LIBRARY_PATH) {
        return Ok(code);
    }

    let documents = match client.list_documents().await {
        Ok(documents) => documents,
        Err(e) => return Ok(api_error_exit(&e)),
    };

    if json {
        return print_json(&documents);
    }

    if documents.is_empty() {
        println!("No documents.");
        return Ok(EXIT_SUCCESS);
    }

    for doc in &documents {
        println!(
            "{}  {}  {}",
            doc.document_id.as_deref().unwrap_or("-"),
            doc.filename.as_deref().unwrap_or("-"),
            doc.status.as_deref().unwrap_or("-").dimmed()
        );
    }
    Ok(EXIT_SUCCESS)
}

/// Execute `document show`
pub async fn show(document_id: String, json: bool) -> Result<i32> {
    let (client, store) = connect()?;
    if let Some(code) = guard_route(&store, router::DOCUMENT_LIBRARY_PATH) {
        return Ok(code);
    }

    let info = match client.document_detail(&document_id).await {
        Ok(info) => info,
        Err(e) => return Ok(api_error_exit(&e)),
    };

    if json {
        return print_json(&info);
    }

    println!("Document: {}", info.document_id.as_deref().unwrap_or(&document_id));
    println!("Filename: {}", info.filename.as_deref().unwrap_or("unknown"));
    println!("Status:   {}", info.status.as_deref().unwrap_or("unknown"));
    if let Some(pages) = info.page_count {
        println!("Pages:    {}", pages);
    }
    if let Some(chunks) = info.chunk_count {
        println!("Chunks:   {}", chunks);
    }
    Ok(EXIT_SUCCESS)
}

/// Execute `document delete`
pub async fn delete(document_id: String) -> Result<i32> {
    let (client, store) = connect()?;
    if let Some(code) = guard_route(&store, router::DOCUMENT_LIBRARY_PATH) {
        return Ok(code);
    }

    match client.delete_document(&document_id).await {
        Ok(response) => {
            display_success(
                &response
                    .message
                    .unwrap_or_else(|| format!("Deleted {}", document_id)),
            );
            Ok(EXIT_SUCCESS)
        }
        Err(e) => Ok(api_error_exit(&e)),
    }
}

/// Execute `document chunk`
pub async fn chunk(
    document_id: String,
    chunk_size: Option<u32>,
    overlap: Option<u32>,
    separator: Option<String>,
    json: bool,
) -> Result<i32> {
    let (client, store) = connect()?;
    if let Some(code) = guard_route(&store, router::DOCUMENT_CHUNKING_PATH) {
        return Ok(code);
    }

    let config = ChunkConfig {
        chunk_size,
        overlap,
        separator,
    };

    match client.chunk_document(&document_id, &config).await {
        Ok(response) => {
            if json {
                return print_json(&response);
            }
            match response.chunk_count {
                Some(count) => display_success(&format!("Produced {} chunks", count)),
                None => display_success("Chunking complete"),
            }
            Ok(EXIT_SUCCESS)
        }
        Err(e) => Ok(api_error_exit(&e)),
    }
}

/// Execute `document vectorize`
pub async fn vectorize(document_id: String) -> Result<i32> {
    let (client, store) = connect()?;
    if let Some(code) = guard_route(&store, router::DOCUMENT_CHUNKING_PATH) {
        return Ok(code);
    }

    display_info("Embedding chunks...");

    match client.vectorize_document(&document_id).await {
        Ok(response) => {
            match response.vector_count {
                Some(count) => display_success(&format!("Embedded {} vectors", count)),
                None => display_success("Vectorization complete"),
            }
            Ok(EXIT_SUCCESS)
        }
        Err(e) => Ok(api_error_exit(&e)),
    }
}

/// Execute `document search`
pub async fn search(
    document_id: String,
    query: String,
    top_k: Option<i32>,
    rerank: bool,
    threshold: Option<f64>,
    json: bool,
) -> Result<i32> {
    let (client, store) = connect()?;
    if let Some(code) = guard_route(&store, router::DOCUMENT_CHUNKING_PATH) {
        return Ok(code);
    }

    let mut request = SearchRequest {
        query,
        ..Default::default()
    };
    if let Some(top_k) = top_k {
        request.top_k = top_k;
    }
    request.use_rerank = rerank;
    request.threshold = threshold;

    let response = match client.search_document(&document_id, &request).await {
        Ok(response) => response,
        Err(e) => return Ok(api_error_exit(&e)),
    };

    if json {
        return print_json(&response);
    }

    if response.results.is_empty() {
        println!("No matching chunks.");
        return Ok(EXIT_SUCCESS);
    }

    for (i, hit) in response.results.iter().enumerate() {
        let preview: String = hit
            .content
            .as_deref()
            .unwrap_or("")
            .chars()
            .take(120)
            .collect();
        match hit.score {
            Some(score) => println!("  {}. {} {}", i + 1, preview, format!("({:.2})", score).dimmed()),
            None => println!("  {}. {}", i + 1, preview),
        }
    }
    Ok(EXIT_SUCCESS)
}

/// Execute `document confirm`
pub async fn confirm(document_id: String) -> Result<i32> {
    let (client, store) = connect()?;
    if let Some(code) = guard_route(&store, router::DOCUMENT_CHUNKING_PATH) {
        return Ok(code);
    }

    match client.confirm_document(&document_id).await {
        Ok(response) => {
            display_success(
                &response
                    .message
                    .unwrap_or_else(|| format!("Confirmed {} into permanent storage", document_id)),
            );
            Ok(EXIT_SUCCESS)
        }
        Err(e) => Ok(api_error_exit(&e)),
    }
}

/// Execute `document content`
///
/// Reads one page of a permanently stored document.
pub async fn content(document_id: String, page: u32, page_size: u32, json: bool) -> Result<i32> {
    let (client, store) = connect()?;
    let route = format!("/permanent-document/{}", document_id);
    if let Some(code) = guard_route(&store, &route) {
        return Ok(code);
    }

    let response = match client
        .permanent_document(&document_id, page, page_size)
        .await
    {
        Ok(response) => response,
        Err(e) => return Ok(api_error_exit(&e)),
    };

    if json {
        return print_json(&response);
    }

    if let Some(total) = response.total {
        println!(
            "{}",
            format!("Page {} ({} chunks total)", response.page.unwrap_or(page), total).bold()
        );
        println!();
    }
    for chunk in &response.chunks {
        if let Some(index) = chunk.index {
            println!("{}", format!("[chunk {}]", index).dimmed());
        }
        println!("{}", chunk.content.as_deref().unwrap_or(""));
        println!();
    }
    Ok(EXIT_SUCCESS)
}
