//! Port for the vector index component.
//!
//! The service never looks inside an index: it hands over texts with
//! opaque metadata, gets back an artifact on disk, and later asks that
//! artifact for the texts closest to a query.

use crate::domain::error::DomainError;
use async_trait::async_trait;
use serde::Serialize;
use std::path::Path;

/// One text to index, with metadata the backend stores verbatim.
#[derive(Debug, Clone)]
pub struct IndexPassage {
    pub text: String,
    pub metadata: serde_json::Value,
}

/// Everything a backend needs to build an index.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub embedding_model: String,
    pub backend_name: String,
    pub passages: Vec<IndexPassage>,
}

/// A single search result, ordered by the backend (most similar first).
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub text: String,
    pub score: f64,
    pub metadata: serde_json::Value,
}

#[async_trait]
pub trait IndexBackend: Send + Sync {
    /// Backend identifier recorded in built artifacts (e.g. "flat").
    fn name(&self) -> &str;

    /// Build an index and persist it at `path`, replacing anything there.
    async fn build(&self, request: BuildRequest, path: &Path) -> Result<(), DomainError>;

    /// Return up to `top_k` hits for `query` from the artifact at `path`.
    async fn search(&self, path: &Path, query: &str, top_k: usize) -> Result<Vec<SearchHit>, DomainError>;
}
