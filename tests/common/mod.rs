//! Shared test helpers.

use memory_api::application::index_adapter::IndexAdapter;
use memory_api::domain::entities::memory::Memory;
use memory_api::domain::error::DomainError;
use memory_api::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use memory_api::infrastructure::embeddings::hashing::HashingProvider;
use memory_api::infrastructure::memory::in_memory_store::InMemoryStore;
use memory_api::MemoryApi;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

pub struct TestApi {
    pub api: MemoryApi,
    pub index_path: PathBuf,
    // Keeps the index directory alive for the test's duration.
    _dir: TempDir,
}

pub fn setup() -> TestApi {
    let dir = tempfile::tempdir().unwrap();
    let index_path = dir.path().join("memories.leann");
    TestApi {
        api: MemoryApi::with_providers(Arc::new(HashingProvider::default()), &index_path),
        index_path,
        _dir: dir,
    }
}

pub fn setup_unavailable() -> TestApi {
    let dir = tempfile::tempdir().unwrap();
    let index_path = dir.path().join("memories.leann");
    let index = IndexAdapter::unavailable("embedding provider disabled", &index_path);
    TestApi {
        api: MemoryApi::with_index(Arc::new(InMemoryStore::new()), index),
        index_path,
        _dir: dir,
    }
}

pub fn setup_with_embedder(embedder: Arc<dyn EmbeddingProvider>) -> TestApi {
    let dir = tempfile::tempdir().unwrap();
    let index_path = dir.path().join("memories.leann");
    TestApi {
        api: MemoryApi::with_providers(embedder, &index_path),
        index_path,
        _dir: dir,
    }
}

pub fn memory(id: &str, text: &str) -> Memory {
    Memory::new(id, text)
}

/// Embedding provider that always fails, for rebuild error paths.
pub struct FailingProvider;

#[async_trait::async_trait]
impl EmbeddingProvider for FailingProvider {
    async fn embed(&self, _texts: &[String], _input_type: InputType) -> Result<Vec<Vec<f32>>, DomainError> {
        Err(DomainError::Embedding("provider offline".into()))
    }

    fn dimension(&self) -> usize {
        0
    }

    fn model(&self) -> &str {
        "failing"
    }
}
