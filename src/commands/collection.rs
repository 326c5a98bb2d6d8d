//! # Collection Commands
//!
//! Browse and manage the permanently stored, vectorized collections.

use anyhow::Result;
use colored::Colorize;

use crate::commands::{api_error_exit, connect, guard_route, print_json};
use crate::errors::display_success;
use crate::exit_codes::*;
use crate::router;

/// Execute `collection list`
pub async fn list(json: bool) -> Result<i32> {
    let (client, store) = connect()?;
    if let Some(code) = guard_route(&store, router::DOCUMENT_LIBRARY_PATH) {
        return Ok(code);
    }

    let listing = match client.collections_list().await {
        Ok(listing) => listing,
        Err(e) => return Ok(api_error_exit(&e)),
    };

    if json {
        return print_json(&listing);
    }

    if listing.collections.is_empty() {
        println!("No collections.");
        return Ok(EXIT_SUCCESS);
    }

    println!("{}", format!("{} collections", listing.total).bold());
    for collection in &listing.collections {
        let chunks = collection
            .chunk_count
            .map(|c| format!("{} chunks", c))
            .unwrap_or_default();
        println!(
            "{}  {}  {}",
            collection.document_id.as_deref().unwrap_or("-"),
            collection.filename.as_deref().unwrap_or("-"),
            chunks.dimmed()
        );
    }
    Ok(EXIT_SUCCESS)
}

/// Execute `collection show`
///
/// Pages through one collection's chunks.
pub async fn show(document_id: String, page: u32, page_size: u32, json: bool) -> Result<i32> {
    let (client, store) = connect()?;
    if let Some(code) = guard_route(&store, router::DOCUMENT_LIBRARY_PATH) {
        return Ok(code);
    }

    let detail = match client.collection_detail(&document_id, page, page_size).await {
        Ok(detail) => detail,
        Err(e) => return Ok(api_error_exit(&e)),
    };

    if json {
        return print_json(&detail);
    }

    if let Some(total) = detail.total {
        println!(
            "{}",
            format!("Page {} ({} chunks total)", detail.page.unwrap_or(page), total).bold()
        );
        println!();
    }
    for chunk in &detail.chunks {
        if let Some(index) = chunk.index {
            println!("{}", format!("[chunk {}]", index).dimmed());
        }
        println!("{}", chunk.content.as_deref().unwrap_or(""));
        println!();
    }
    Ok(EXIT_SUCCESS)
}

/// Execute `collection delete`
pub async fn delete(document_id: String) -> Result<i32> {
    let (client, store) = connect()?;
    if let Some(code) = guard_route(&store, router::DOCUMENT_LIBRARY_PATH) {
        return Ok(code);
    }

    match client.delete_collection(&document_id).await {
        Ok(response) => {
            display_success(
                &response
                    .message
                    .unwrap_or_else(|| format!("Deleted collection {}", document_id)),
            );
            Ok(EXIT_SUCCESS)
        }
        Err(e) => Ok(api_error_exit(&e)),
    }
}
