use crate::domain::ports::memory_store::MemoryStore;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Entries {
    ordered: Vec<(String, String)>,
    positions: HashMap<String, usize>,
}

/// Process-local store; contents are lost on restart.
#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<Entries>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock still holds consistent entries: every mutation
    // below completes before it can panic.
    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Entries> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl MemoryStore for InMemoryStore {
    fn put(&self, id: &str, text: &str) {
        let mut entries = self.write();
        match entries.positions.get(id).copied() {
            Some(pos) => entries.ordered[pos].1 = text.to_string(),
            None => {
                let pos = entries.ordered.len();
                entries.ordered.push((id.to_string(), text.to_string()));
                entries.positions.insert(id.to_string(), pos);
            }
        }
    }

    fn get(&self, id: &str) -> Option<String> {
        let entries = self.read();
        entries
            .positions
            .get(id)
            .map(|&pos| entries.ordered[pos].1.clone())
    }

    fn list_ids(&self) -> Vec<String> {
        self.read().ordered.iter().map(|(id, _)| id.clone()).collect()
    }

    fn len(&self) -> usize {
        self.read().ordered.len()
    }

    fn clear(&self) {
        let mut entries = self.write();
        entries.ordered.clear();
        entries.positions.clear();
    }

    fn snapshot(&self) -> Vec<(String, String)> {
        self.read().ordered.clone()
    }

    fn find_id_by_text(&self, text: &str) -> Option<String> {
        self.read()
            .ordered
            .iter()
            .find(|(_, t)| t == text)
            .map(|(id, _)| id.clone())
    }
}
