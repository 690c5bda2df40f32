pub mod api;
pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::add_memory::{AddMemoryUseCase, AddOutcome, BulkAddOutcome};
use crate::application::clear::ClearUseCase;
use crate::application::index_adapter::IndexAdapter;
use crate::application::search::{RelatedMemories, SearchUseCase};
use crate::application::stats::{ServiceStatus, StatsUseCase};
use crate::config::Config;
use crate::domain::entities::memory::Memory;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::ports::memory_store::MemoryStore;
use crate::infrastructure::embeddings::hashing::HashingProvider;
use crate::infrastructure::embeddings::openai::OpenAiProvider;
use crate::infrastructure::embeddings::voyage::VoyageProvider;
use crate::infrastructure::memory::in_memory_store::InMemoryStore;
use crate::infrastructure::sqlite::index_backend::SqliteIndexBackend;
use std::path::PathBuf;
use std::sync::Arc;

pub struct MemoryApi {
    add_memory_uc: AddMemoryUseCase,
    search_uc: SearchUseCase,
    clear_uc: ClearUseCase,
    stats_uc: StatsUseCase,
}

impl MemoryApi {
    /// Loads the index component from `config`. A load failure does not
    /// stop the service: it runs with search and writes disabled.
    pub fn new(config: &Config) -> Self {
        let index = match load_embedder(config) {
            Ok(embedder) => {
                log::info!(
                    "Semantic index loaded (embedding model {}, dimension {})",
                    embedder.model(),
                    embedder.dimension()
                );
                Self::loaded_index(embedder, config.index_path.clone())
            }
            Err(e) => {
                log::warn!("Semantic index not available: {e}");
                log::warn!("  Service runs in fallback mode (no semantic search)");
                log::warn!("  To enable it: MEMORY_API_EMBEDDING_PROVIDER=hashing");
                IndexAdapter::unavailable(e.to_string(), config.index_path.clone())
            }
        };
        Self::with_index(Arc::new(InMemoryStore::new()), index)
    }

    pub fn with_providers(embedder: Arc<dyn EmbeddingProvider>, index_path: impl Into<PathBuf>) -> Self {
        Self::with_index(
            Arc::new(InMemoryStore::new()),
            Self::loaded_index(embedder, index_path.into()),
        )
    }

    pub fn with_index(store: Arc<dyn MemoryStore>, index: IndexAdapter) -> Self {
        let index = Arc::new(index);
        Self {
            add_memory_uc: AddMemoryUseCase::new(store.clone(), index.clone()),
            search_uc: SearchUseCase::new(store.clone(), index.clone()),
            clear_uc: ClearUseCase::new(store.clone(), index.clone()),
            stats_uc: StatsUseCase::new(store, index),
        }
    }

    fn loaded_index(embedder: Arc<dyn EmbeddingProvider>, index_path: PathBuf) -> IndexAdapter {
        let model = embedder.model().to_string();
        IndexAdapter::loaded(Arc::new(SqliteIndexBackend::new(embedder)), model, index_path)
    }

    // Delegating methods
    pub async fn add(&self, memory: Memory) -> Result<AddOutcome, DomainError> {
        self.add_memory_uc.add(memory).await
    }

    pub async fn bulk_add(&self, memories: Vec<Memory>) -> Result<BulkAddOutcome, DomainError> {
        self.add_memory_uc.bulk_add(memories).await
    }

    pub async fn related(&self, memory_id: &str, k: usize) -> Result<RelatedMemories, DomainError> {
        self.search_uc.related(memory_id, k).await
    }

    pub fn list_ids(&self) -> Vec<String> {
        self.stats_uc.list_ids()
    }

    pub fn status(&self) -> ServiceStatus {
        self.stats_uc.status()
    }

    pub async fn clear(&self) {
        self.clear_uc.execute().await
    }
}

fn load_embedder(config: &Config) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
    match config.embedding_provider.as_str() {
        "hashing" => Ok(Arc::new(HashingProvider::default())),
        "openai" => {
            if config.embedding_api_key.is_empty() && config.embedding_base_url.is_none() {
                return Err(DomainError::Config(
                    "MEMORY_API_EMBEDDING_API_KEY is required for the openai provider".into(),
                ));
            }
            Ok(Arc::new(OpenAiProvider::new(
                config.embedding_api_key.clone(),
                config.embedding_model.clone(),
                config.embedding_base_url.clone(),
            )))
        }
        "voyage" => {
            if config.embedding_api_key.is_empty() {
                return Err(DomainError::Config(
                    "MEMORY_API_EMBEDDING_API_KEY is required for the voyage provider".into(),
                ));
            }
            Ok(Arc::new(VoyageProvider::new(
                config.embedding_api_key.clone(),
                config.embedding_model.clone(),
                config.embedding_base_url.clone(),
            )))
        }
        "disabled" => Err(DomainError::Config("embedding provider disabled".into())),
        other => Err(DomainError::Config(format!("unknown embedding provider '{other}'"))),
    }
}
