use crate::application::index_adapter::IndexAdapter;
use crate::domain::entities::memory::Memory;
use crate::domain::error::DomainError;
use crate::domain::ports::memory_store::MemoryStore;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AddOutcome {
    pub memory_id: String,
    pub total_memories: usize,
}

#[derive(Debug, Clone)]
pub struct BulkAddOutcome {
    pub added: usize,
    pub total_memories: usize,
}

pub struct AddMemoryUseCase {
    store: Arc<dyn MemoryStore>,
    index: Arc<IndexAdapter>,
}

impl AddMemoryUseCase {
    pub fn new(store: Arc<dyn MemoryStore>, index: Arc<IndexAdapter>) -> Self {
        Self { store, index }
    }

    pub async fn add(&self, memory: Memory) -> Result<AddOutcome, DomainError> {
        self.index.ensure_available()?;

        let _gate = self.index.lock_writes().await;
        self.store.put(&memory.id, &memory.text);
        self.rebuild().await?;

        Ok(AddOutcome {
            memory_id: memory.id,
            total_memories: self.store.len(),
        })
    }

    /// Stores every memory, then rebuilds once. If the rebuild fails the
    /// store keeps the new entries and the previous artifact stays in place.
    pub async fn bulk_add(&self, memories: Vec<Memory>) -> Result<BulkAddOutcome, DomainError> {
        self.index.ensure_available()?;

        let _gate = self.index.lock_writes().await;
        for memory in &memories {
            self.store.put(&memory.id, &memory.text);
        }
        self.rebuild().await?;

        Ok(BulkAddOutcome {
            added: memories.len(),
            total_memories: self.store.len(),
        })
    }

    async fn rebuild(&self) -> Result<(), DomainError> {
        self.index.rebuild(self.store.snapshot()).await.map_err(|e| {
            log::error!("Index rebuild failed: {e}");
            e
        })
    }
}
