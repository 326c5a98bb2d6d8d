//! # API Layer
//!
//! Typed request constructors for the RAG document Q&A backend. Every
//! function maps one-to-one to a REST endpoint and delegates to the shared
//! [`ApiClient`] pipeline.
//!
//! - [`client`] - ApiClient, error taxonomy, shared request pipeline
//! - [`chat`] - question answering, model management, retrieval cache
//! - [`document`] - document pipeline and collection store
//! - [`usage`] - admin usage limits and counters

pub mod chat;
pub mod client;
pub mod document;
pub mod usage;

pub use client::{ApiClient, ApiError};
