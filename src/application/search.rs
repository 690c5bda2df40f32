use crate::application::index_adapter::IndexAdapter;
use crate::domain::error::DomainError;
use crate::domain::ports::memory_store::MemoryStore;
use std::sync::Arc;

/// Parallel arrays: `scores[i]` belongs to `related_ids[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelatedMemories {
    pub related_ids: Vec<String>,
    pub scores: Vec<f64>,
}

pub struct SearchUseCase {
    store: Arc<dyn MemoryStore>,
    index: Arc<IndexAdapter>,
}

impl SearchUseCase {
    pub fn new(store: Arc<dyn MemoryStore>, index: Arc<IndexAdapter>) -> Self {
        Self { store, index }
    }

    /// Memories most similar to `memory_id`, excluding the memory itself.
    ///
    /// Asks the index for `k + 1` hits and drops the first one, assuming it
    /// is the query's own text. Hits are mapped back to ids by exact text
    /// match in store order, so duplicate texts resolve to the earliest id
    /// and hits whose text is no longer stored are dropped.
    pub async fn related(&self, memory_id: &str, k: usize) -> Result<RelatedMemories, DomainError> {
        self.index.ensure_available()?;

        let query_text = self
            .store
            .get(memory_id)
            .ok_or_else(|| DomainError::NotFound(memory_id.to_string()))?;

        if !self.index.index_exists() {
            return Ok(RelatedMemories::default());
        }

        let hits = self.index.query(&query_text, k.saturating_add(1)).await?;

        let mut related = RelatedMemories::default();
        for hit in hits.into_iter().skip(1) {
            if let Some(id) = self.store.find_id_by_text(&hit.text) {
                related.related_ids.push(id);
                related.scores.push(hit.score);
            }
        }
        related.related_ids.truncate(k);
        related.scores.truncate(k);
        Ok(related)
    }
}
