use crate::application::index_adapter::IndexAdapter;
use crate::domain::ports::memory_store::MemoryStore;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ServiceStatus {
    pub index_available: bool,
    pub total_memories: usize,
}

pub struct StatsUseCase {
    store: Arc<dyn MemoryStore>,
    index: Arc<IndexAdapter>,
}

impl StatsUseCase {
    pub fn new(store: Arc<dyn MemoryStore>, index: Arc<IndexAdapter>) -> Self {
        Self { store, index }
    }

    pub fn status(&self) -> ServiceStatus {
        ServiceStatus {
            index_available: self.index.is_available(),
            total_memories: self.store.len(),
        }
    }

    pub fn list_ids(&self) -> Vec<String> {
        self.store.list_ids()
    }
}
