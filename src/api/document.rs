//! # Document API
//!
//! This module contains the API endpoints and types for the document
//! pipeline (upload, chunk, vectorize, search, confirm) and for the
//! permanent collection store.

use crate::api::client::{ApiClient, ApiError};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Request Types
// =============================================================================

/// Caller-supplied chunking overrides.
///
/// Every unset key falls back to the server-mirroring defaults of
/// [`ChunkRequest`]; the merged configuration is always sent in full.
#[derive(Debug, Clone, Default)]
pub struct ChunkConfig {
    /// Chunk size in characters (100-2000).
    pub chunk_size: Option<u32>,
    /// Overlap between neighboring chunks in characters (0-500).
    pub overlap: Option<u32>,
    /// Separator the splitter prefers to break on.
    pub separator: Option<String>,
}

impl ChunkConfig {
    /// Merge these overrides over the defaults into a full request payload.
    pub fn resolve(&self) -> ChunkRequest {
        let defaults = ChunkRequest::default();
        ChunkRequest {
            chunk_size: self.chunk_size.unwrap_or(defaults.chunk_size),
            overlap: self.overlap.unwrap_or(defaults.overlap),
            separator: self
                .separator
                .clone()
                .unwrap_or(defaults.separator),
        }
    }
}

/// Full chunking configuration as sent on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkRequest {
    /// Chunk size in characters.
    pub chunk_size: u32,
    /// Overlap between neighboring chunks in characters.
    pub overlap: u32,
    /// Separator the splitter prefers to break on.
    pub separator: String,
}

impl Default for ChunkRequest {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            overlap: 50,
            separator: "\n\n".to_string(),
        }
    }
}

/// Request for a retrieval test against a single document
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    /// Search question.
    pub query: String,
    /// Number of results to return (1-20).
    pub top_k: i32,
    /// Whether to apply a rerank pass to the candidates.
    pub use_rerank: bool,
    /// Minimum similarity score (0.0-1.0). Omitted when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            top_k: 5,
            use_rerank: false,
            threshold: None,
        }
    }
}

/// Body for deleting a collection by document id
#[derive(Debug, Clone, Serialize)]
struct DeleteCollectionRequest {
    document_id: String,
}

// =============================================================================
// Response Types
// =============================================================================

/// Document metadata as returned by listing and detail endpoints
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocumentInfo {
    /// Document identifier.
    pub document_id: Option<String>,
    /// Original file name.
    pub filename: Option<String>,
    /// Pipeline status (uploaded, chunked, vectorized, confirmed).
    pub status: Option<String>,
    /// Number of pages in the source file.
    pub page_count: Option<u32>,
    /// Number of chunks produced so far.
    pub chunk_count: Option<u32>,
    /// Upload timestamp.
    pub created_at: Option<String>,
}

/// Response from triggering chunking
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChunkResponse {
    /// Document that was chunked.
    pub document_id: Option<String>,
    /// Number of chunks produced.
    pub chunk_count: Option<u32>,
    /// Preview of the produced chunks.
    #[serde(default)]
    pub chunks: Vec<ChunkRecord>,
    /// Human-readable confirmation.
    pub message: Option<String>,
}

/// A single stored chunk
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChunkRecord {
    /// Position of the chunk within its document.
    pub index: Option<u32>,
    /// Chunk text.
    pub content: Option<String>,
    /// Character length of the chunk.
    pub length: Option<u32>,
    /// Additional chunk metadata.
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Response from triggering vectorization
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VectorizeResponse {
    /// Document that was vectorized.
    pub document_id: Option<String>,
    /// Number of embedded vectors.
    pub vector_count: Option<u32>,
    /// Human-readable confirmation.
    pub message: Option<String>,
}

/// A retrieval hit from a document search
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchHit {
    /// Chunk text.
    pub content: Option<String>,
    /// Similarity score (0-1).
    pub score: Option<f64>,
    /// Position of the chunk within its document.
    pub index: Option<u32>,
    /// Additional chunk metadata.
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Response from a retrieval test
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    /// Matching chunks, best first.
    #[serde(default)]
    pub results: Vec<SearchHit>,
    /// Total candidates considered.
    pub total: Option<u64>,
}

/// Response from confirming a document into permanent storage
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConfirmResponse {
    /// Document that was confirmed.
    pub document_id: Option<String>,
    /// Number of vectors promoted.
    pub migrated_count: Option<u32>,
    /// Human-readable confirmation.
    pub message: Option<String>,
}

/// One page of a permanently stored document
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PermanentDocumentPage {
    /// Document identifier.
    pub document_id: Option<String>,
    /// Current page number.
    pub page: Option<u32>,
    /// Page size used.
    pub page_size: Option<u32>,
    /// Total chunks stored for the document.
    pub total: Option<u64>,
    /// Chunks on this page.
    #[serde(default)]
    pub chunks: Vec<ChunkRecord>,
}

/// Summary of one stored collection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CollectionSummary {
    /// Document identifier the collection was built from.
    pub document_id: Option<String>,
    /// Original file name.
    pub filename: Option<String>,
    /// Number of chunks in the collection.
    pub chunk_count: Option<u32>,
    /// Confirmation timestamp.
    pub created_at: Option<String>,
}

/// Listing of all stored collections
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CollectionsList {
    /// Number of collections.
    #[serde(default)]
    pub total: u64,
    /// The collections.
    #[serde(default)]
    pub collections: Vec<CollectionSummary>,
    /// Server timestamp of the listing.
    pub timestamp: Option<String>,
}

/// Paginated chunk listing for one collection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CollectionDetail {
    /// Document identifier the collection was built from.
    pub document_id: Option<String>,
    /// Current page number.
    pub page: Option<u32>,
    /// Page size used.
    pub page_size: Option<u32>,
    /// Total chunks in the collection.
    pub total: Option<u64>,
    /// Chunks on this page.
    #[serde(default)]
    pub chunks: Vec<ChunkRecord>,
}

/// Response from a delete operation
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeleteResponse {
    /// Human-readable confirmation.
    pub message: Option<String>,
    /// Number of records removed.
    pub deleted_count: Option<u64>,
}

// =============================================================================
// API Client Methods
// =============================================================================

impl ApiClient {
    /// Upload a document file
    ///
    /// Submits the file as multipart form data under the `file` field.
    ///
    /// # Arguments
    ///
    /// * `file_name` - Name reported for the uploaded file
    /// * `contents` - Raw file bytes
    pub async fn upload_document(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<DocumentInfo, ApiError> {
        let part = Part::bytes(contents).file_name(file_name.to_string());
        let form = Form::new().part("file", part);
        self.post_multipart("/api/documents/upload", form).await
    }

    /// List all documents
    pub async fn list_documents(&self) -> Result<Vec<DocumentInfo>, ApiError> {
        self.get("/api/documents", &[]).await
    }

    /// Fetch metadata for one document
    pub async fn document_detail(&self, document_id: &str) -> Result<DocumentInfo, ApiError> {
        self.get(&format!("/api/documents/{}", document_id), &[])
            .await
    }

    /// Delete a document (legacy single-document delete)
    pub async fn delete_document(&self, document_id: &str) -> Result<DeleteResponse, ApiError> {
        self.delete(&format!("/api/documents/{}", document_id), &[])
            .await
    }

    /// Delete a stored collection
    ///
    /// The document id travels in the request body.
    pub async fn delete_collection(&self, document_id: &str) -> Result<DeleteResponse, ApiError> {
        let request = DeleteCollectionRequest {
            document_id: document_id.to_string(),
        };
        self.delete_json("/api/collections/delete", &request).await
    }

    /// Chunk a document
    ///
    /// The caller's overrides are merged over the defaults
    /// `{chunk_size: 500, overlap: 50, separator: "\n\n"}` and the merged
    /// configuration is sent in full.
    ///
    /// # Arguments
    ///
    /// * `document_id` - Document to chunk
    /// * `config` - Partial chunking overrides
    pub async fn chunk_document(
        &self,
        document_id: &str,
        config: &ChunkConfig,
    ) -> Result<ChunkResponse, ApiError> {
        self.post(
            &format!("/api/documents/{}/chunk", document_id),
            &config.resolve(),
        )
        .await
    }

    /// Embed a document's chunks
    pub async fn vectorize_document(&self, document_id: &str) -> Result<VectorizeResponse, ApiError> {
        self.post_empty(&format!("/api/documents/{}/vectorize", document_id))
            .await
    }

    /// Run a retrieval test against one document
    ///
    /// # Arguments
    ///
    /// * `document_id` - Document to search
    /// * `request` - Query and retrieval options
    pub async fn search_document(
        &self,
        document_id: &str,
        request: &SearchRequest,
    ) -> Result<SearchResponse, ApiError> {
        self.post(&format!("/api/documents/{}/search", document_id), request)
            .await
    }

    /// Promote a document's staged vectors to permanent storage
    pub async fn confirm_document(&self, document_id: &str) -> Result<ConfirmResponse, ApiError> {
        self.post_empty(&format!("/api/documents/{}/confirm", document_id))
            .await
    }

    /// Fetch one page of a permanently stored document
    ///
    /// # Arguments
    ///
    /// * `document_id` - Document to read
    /// * `page` - Page number, starting at 1
    /// * `page_size` - Chunks per page (1-100)
    pub async fn permanent_document(
        &self,
        document_id: &str,
        page: u32,
        page_size: u32,
    ) -> Result<PermanentDocumentPage, ApiError> {
        self.get(
            &format!("/api/documents/{}/permanent", document_id),
            &[("page", page.to_string()), ("page_size", page_size.to_string())],
        )
        .await
    }

    /// List all stored collections
    pub async fn collections_list(&self) -> Result<CollectionsList, ApiError> {
        self.get("/api/collections/list", &[]).await
    }

    /// Fetch one page of a collection's chunks
    ///
    /// # Arguments
    ///
    /// * `document_id` - Collection to read
    /// * `page` - Page number, starting at 1
    /// * `page_size` - Chunks per page (1-50)
    pub async fn collection_detail(
        &self,
        document_id: &str,
        page: u32,
        page_size: u32,
    ) -> Result<CollectionDetail, ApiError> {
        self.get(
            &format!("/api/collections/detail/{}", document_id),
            &[("page", page.to_string()), ("page_size", page_size.to_string())],
        )
        .await
    }
}
