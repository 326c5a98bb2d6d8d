//! # Chat API
//!
//! This module contains the API endpoints and types for RAG question
//! answering, model management, and the server-side retrieval cache.

use crate::api::client::{ApiClient, ApiError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Request Types
// =============================================================================

/// Request to switch the active model provider
#[derive(Debug, Clone, Serialize)]
pub struct SwitchModelRequest {
    /// Provider name (e.g., "deepseek", "qwen")
    pub provider: String,
    /// Sampling temperature (0.0-2.0). Omitted from the payload when unset
    /// so the server keeps its current value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

impl SwitchModelRequest {
    /// Create a request for a provider, keeping the server's temperature.
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            temperature: None,
        }
    }
}

/// Request for a RAG question-answering query
///
/// Range limits are documented for reference and enforced by the server;
/// out-of-range values are passed through unchanged.
///
/// # Example
///
/// ```rust
/// use ragdoc::api::chat::RagQueryRequest;
///
/// let request = RagQueryRequest {
///     question: "What does chapter 3 cover?".to_string(),
///     ..Default::default()
/// };
/// assert_eq!(request.top_k, 5);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct RagQueryRequest {
    /// The user's question.
    pub question: String,
    /// Number of chunks to retrieve (1-20).
    pub top_k: i32,
    /// Whether to include source chunks in the answer.
    pub return_sources: bool,
    /// Whether to apply a rerank pass to the retrieved candidates.
    pub use_rerank: bool,
    /// Custom system prompt. Omitted when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    /// Restrict retrieval to a single document. Omitted when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    /// Minimum similarity score for retrieval (0.0-1.0). Omitted when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    /// Legacy metadata filter. Accepted for source compatibility but no
    /// longer part of the wire payload.
    #[serde(skip_serializing)]
    pub filter: Option<HashMap<String, serde_json::Value>>,
}

impl Default for RagQueryRequest {
    fn default() -> Self {
        Self {
            question: String::new(),
            top_k: 5,
            return_sources: true,
            use_rerank: false,
            system_prompt: None,
            document_id: None,
            threshold: None,
            filter: None,
        }
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// Information about the active model
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelInfo {
    /// Active provider name.
    pub provider: Option<String>,
    /// Active model identifier.
    pub model: Option<String>,
    /// Current sampling temperature.
    pub temperature: Option<f64>,
    /// Providers the server can switch to.
    #[serde(default)]
    pub available_providers: Vec<String>,
}

/// Response from switching the model provider
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SwitchModelResponse {
    /// Provider now active.
    pub provider: Option<String>,
    /// Human-readable confirmation.
    pub message: Option<String>,
}

/// A source chunk backing a RAG answer
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RagSource {
    /// Chunk text.
    pub content: Option<String>,
    /// Similarity score (0-1).
    pub score: Option<f64>,
    /// Document the chunk belongs to.
    pub document_id: Option<String>,
    /// Additional chunk metadata.
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Response from a RAG query
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RagQueryResponse {
    /// Generated answer.
    pub answer: String,
    /// Source chunks, present when `return_sources` was requested.
    #[serde(default)]
    pub sources: Vec<RagSource>,
    /// Provider that generated the answer.
    pub provider: Option<String>,
    /// Model that generated the answer.
    pub model: Option<String>,
}

/// Retrieval cache statistics
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheStats {
    /// Whether the cache is enabled.
    pub enabled: Option<bool>,
    /// Number of cached entries.
    pub entries: Option<u64>,
    /// Cache hits since startup.
    pub hits: Option<u64>,
    /// Cache misses since startup.
    pub misses: Option<u64>,
    /// Hit rate (0-1).
    pub hit_rate: Option<f64>,
}

/// Response from clearing the retrieval cache
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheClearResponse {
    /// Number of entries removed.
    pub cleared: Option<u64>,
    /// Human-readable confirmation.
    pub message: Option<String>,
}

// =============================================================================
// API Client Methods
// =============================================================================

impl ApiClient {
    /// Get information about the active model
    pub async fn model_info(&self) -> Result<ModelInfo, ApiError> {
        self.get("/api/chat/model-info", &[]).await
    }

    /// Switch the active model provider
    ///
    /// # Arguments
    ///
    /// * `request` - Provider to activate and optional temperature
    pub async fn switch_model(
        &self,
        request: &SwitchModelRequest,
    ) -> Result<SwitchModelResponse, ApiError> {
        self.post("/api/chat/switch-model", request).await
    }

    /// Ask a question over the document corpus
    ///
    /// Retrieves relevant chunks and generates an answer, optionally
    /// returning the source chunks used.
    ///
    /// # Arguments
    ///
    /// * `request` - RAG query request
    ///
    /// # Returns
    ///
    /// * `Ok(RagQueryResponse)` - Answer generated successfully
    /// * `Err(ApiError)` - Request failed
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use ragdoc::api::chat::RagQueryRequest;
    /// use ragdoc::api::ApiClient;
    /// use ragdoc::session::SessionStore;
    ///
    /// async fn ask() -> Result<(), ragdoc::api::ApiError> {
    ///     let session = SessionStore::open_default().unwrap();
    ///     let client = ApiClient::new("http://localhost:8000".to_string(), session);
    ///     let request = RagQueryRequest {
    ///         question: "Summarize the introduction".to_string(),
    ///         ..Default::default()
    ///     };
    ///     let response = client.query_rag(&request).await?;
    ///     println!("{}", response.answer);
    ///     Ok(())
    /// }
    /// ```
    pub async fn query_rag(&self, request: &RagQueryRequest) -> Result<RagQueryResponse, ApiError> {
        self.post("/api/chat/query", request).await
    }

    /// Get retrieval cache statistics
    pub async fn cache_stats(&self) -> Result<CacheStats, ApiError> {
        self.get("/api/chat/cache/stats", &[]).await
    }

    /// Clear the retrieval cache
    ///
    /// # Arguments
    ///
    /// * `document_id` - Restrict clearing to one document's entries; `None`
    ///   clears everything. Travels as a query parameter.
    pub async fn clear_cache(
        &self,
        document_id: Option<&str>,
    ) -> Result<CacheClearResponse, ApiError> {
        let mut query = Vec::new();
        if let Some(id) = document_id {
            query.push(("document_id", id.to_string()));
        }
        self.delete("/api/chat/cache/clear", &query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_model_without_temperature_omits_the_key() {
        let request = SwitchModelRequest::new("deepseek");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"provider": "deepseek"}));
    }

    #[test]
    fn test_switch_model_with_temperature() {
        let request = SwitchModelRequest {
            provider: "qwen".to_string(),
            temperature: Some(0.7),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"provider": "qwen", "temperature": 0.7})
        );
    }

    #[test]
    fn test_rag_query_request_defaults() {
        let request = RagQueryRequest::default();
        assert_eq!(request.top_k, 5);
        assert!(request.return_sources);
        assert!(!request.use_rerank);
        assert!(request.system_prompt.is_none());
        assert!(request.threshold.is_none());
    }

    #[test]
    fn test_rag_query_request_minimal_serialization() {
        let request = RagQueryRequest {
            question: "What is chunking?".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "question": "What is chunking?",
                "top_k": 5,
                "return_sources": true,
                "use_rerank": false
            })
        );
    }

    #[test]
    fn test_rag_query_request_full_serialization() {
        let request = RagQueryRequest {
            question: "What is chunking?".to_string(),
            top_k: 10,
            return_sources: false,
            use_rerank: true,
            system_prompt: Some("Answer briefly.".to_string()),
            document_id: Some("doc_abc123".to_string()),
            threshold: Some(0.4),
            filter: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"top_k\":10"));
        assert!(json.contains("\"use_rerank\":true"));
        assert!(json.contains("Answer briefly."));
        assert!(json.contains("doc_abc123"));
        assert!(json.contains("\"threshold\":0.4"));
    }

    #[test]
    fn test_rag_query_request_never_serializes_filter() {
        let mut filter = HashMap::new();
        filter.insert("author".to_string(), serde_json::json!("smith"));
        let request = RagQueryRequest {
            question: "q".to_string(),
            filter: Some(filter),
            ..Default::default()
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("filter"));
        assert!(!json.contains("author"));
    }

    #[test]
    fn test_rag_query_response_deserialization() {
        let json = r#"{
            "answer": "Chunking splits documents into segments.",
            "sources": [
                {"content": "…", "score": 0.82, "document_id": "doc_abc123"}
            ],
            "provider": "deepseek"
        }"#;
        let response: RagQueryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.answer, "Chunking splits documents into segments.");
        assert_eq!(response.sources.len(), 1);
        assert_eq!(response.sources[0].document_id.as_deref(), Some("doc_abc123"));
    }

    #[test]
    fn test_rag_query_response_without_sources() {
        let json = r#"{"answer": "Forty-two."}"#;
        let response: RagQueryResponse = serde_json::from_str(json).unwrap();
        assert!(response.sources.is_empty());
        assert!(response.provider.is_none());
    }

    #[test]
    fn test_model_info_deserialization() {
        let json = r#"{
            "provider": "qwen",
            "model": "qwen-turbo",
            "temperature": 0.3,
            "available_providers": ["deepseek", "qwen"]
        }"#;
        let info: ModelInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.provider.as_deref(), Some("qwen"));
        assert_eq!(info.available_providers.len(), 2);
    }

    #[test]
    fn test_cache_stats_tolerates_partial_payloads() {
        let json = r#"{"entries": 12}"#;
        let stats: CacheStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.entries, Some(12));
        assert!(stats.hit_rate.is_none());
    }
}
