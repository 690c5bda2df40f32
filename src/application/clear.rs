use crate::application::index_adapter::IndexAdapter;
use crate::domain::ports::memory_store::MemoryStore;
use std::sync::Arc;

pub struct ClearUseCase {
    store: Arc<dyn MemoryStore>,
    index: Arc<IndexAdapter>,
}

impl ClearUseCase {
    pub fn new(store: Arc<dyn MemoryStore>, index: Arc<IndexAdapter>) -> Self {
        Self { store, index }
    }

    /// Works whether or not the index component is available.
    pub async fn execute(&self) {
        let _gate = self.index.lock_writes().await;
        let removed = self.store.len();
        self.store.clear();
        self.index.remove_index();
        log::info!("Cleared {removed} memories");
    }
}
