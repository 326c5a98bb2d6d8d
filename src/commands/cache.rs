//! # Cache Commands
//!
//! Inspect and clear the server-side retrieval cache. The client forwards
//! these operations; no caching happens locally.

use anyhow::Result;

use crate::commands::{api_error_exit, connect, guard_route, print_json};
use crate::errors::display_success;
use crate::exit_codes::*;
use crate::router;

/// Execute `cache stats`
pub async fn stats(json: bool) -> Result<i32> {
    let (client, store) = connect()?;
    if let Some(code) = guard_route(&store, router::RAG_QA_PATH) {
        return Ok(code);
    }

    let stats = match client.cache_stats().await {
        Ok(stats) => stats,
        Err(e) => return Ok(api_error_exit(&e)),
    };

    if json {
        return print_json(&stats);
    }

    if let Some(enabled) = stats.enabled {
        println!("Enabled:  {}", enabled);
    }
    println!("Entries:  {}", stats.entries.unwrap_or(0));
    println!("Hits:     {}", stats.hits.unwrap_or(0));
    println!("Misses:   {}", stats.misses.unwrap_or(0));
    if let Some(hit_rate) = stats.hit_rate {
        println!("Hit rate: {:.1}%", hit_rate * 100.0);
    }

    Ok(EXIT_SUCCESS)
}

/// Execute `cache clear`
///
/// # Arguments
///
/// * `document` - Restrict clearing to one document's entries; `None`
///   clears everything
pub async fn clear(document: Option<String>) -> Result<i32> {
    let (client, store) = connect()?;
    if let Some(code) = guard_route(&store, router::RAG_QA_PATH) {
        return Ok(code);
    }

    match client.clear_cache(document.as_deref()).await {
        Ok(response) => {
            display_success(&response.message.unwrap_or_else(|| "Cache cleared.".to_string()));
            Ok(EXIT_SUCCESS)
        }
        Err(e) => Ok(api_error_exit(&e)),
    }
}
