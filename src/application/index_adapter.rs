//! Call-through to the vector index component.
//!
//! Every write rebuilds the whole artifact from a full store snapshot:
//! there is no incremental update, so each write costs O(n) embeddings
//! where n is the total number of memories.

use crate::domain::error::DomainError;
use crate::domain::ports::index_backend::{BuildRequest, IndexBackend, IndexPassage, SearchHit};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

enum Availability {
    Loaded {
        backend: Arc<dyn IndexBackend>,
        embedding_model: String,
    },
    Unavailable {
        reason: String,
    },
}

pub struct IndexAdapter {
    availability: Availability,
    index_path: PathBuf,
    write_gate: Mutex<()>,
}

impl IndexAdapter {
    pub fn loaded(
        backend: Arc<dyn IndexBackend>,
        embedding_model: impl Into<String>,
        index_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            availability: Availability::Loaded {
                backend,
                embedding_model: embedding_model.into(),
            },
            index_path: index_path.into(),
            write_gate: Mutex::new(()),
        }
    }

    pub fn unavailable(reason: impl Into<String>, index_path: impl Into<PathBuf>) -> Self {
        Self {
            availability: Availability::Unavailable {
                reason: reason.into(),
            },
            index_path: index_path.into(),
            write_gate: Mutex::new(()),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self.availability, Availability::Loaded { .. })
    }

    /// Fails with `IndexUnavailable` unless the index component loaded.
    pub fn ensure_available(&self) -> Result<(), DomainError> {
        self.backend().map(|_| ())
    }

    fn backend(&self) -> Result<(&Arc<dyn IndexBackend>, &str), DomainError> {
        match &self.availability {
            Availability::Loaded {
                backend,
                embedding_model,
            } => Ok((backend, embedding_model.as_str())),
            Availability::Unavailable { reason } => {
                Err(DomainError::IndexUnavailable(reason.clone()))
            }
        }
    }

    /// Serializes writers. Held across "mutate store, rebuild artifact" so
    /// the artifact on disk always matches some sequential order of writes.
    pub async fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_gate.lock().await
    }

    pub async fn rebuild(&self, snapshot: Vec<(String, String)>) -> Result<(), DomainError> {
        let (backend, embedding_model) = self.backend()?;

        let request = BuildRequest {
            embedding_model: embedding_model.to_string(),
            backend_name: backend.name().to_string(),
            passages: snapshot
                .into_iter()
                .map(|(id, text)| IndexPassage {
                    text,
                    metadata: json!({ "id": id }),
                })
                .collect(),
        };
        let count = request.passages.len();

        backend.build(request, &self.index_path).await?;
        log::info!(
            "Rebuilt index at {} with {} memories",
            self.index_path.display(),
            count
        );
        Ok(())
    }

    /// Results come back in the backend's order; nothing is re-sorted.
    pub async fn query(&self, text: &str, top_k: usize) -> Result<Vec<SearchHit>, DomainError> {
        let (backend, _) = self.backend()?;
        backend.search(&self.index_path, text, top_k).await
    }

    pub fn index_exists(&self) -> bool {
        self.index_path.exists()
    }

    /// Best-effort: a failed delete is logged, never surfaced.
    ///
    /// Also sweeps staging files (`<name>.<id>.tmp`) left next to the
    /// artifact by builds that never finished, e.g. after a crash.
    pub fn remove_index(&self) {
        if self.index_exists() {
            Self::remove_file(&self.index_path);
        }
        for stale in self.staging_leftovers() {
            Self::remove_file(&stale);
        }
    }

    fn staging_leftovers(&self) -> Vec<PathBuf> {
        let Some(name) = self.index_path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            return Vec::new();
        };
        let dir = match self.index_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let prefix = format!("{name}.");

        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };
        entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .map(|n| n.to_string_lossy())
                    .is_some_and(|n| n.starts_with(&prefix) && n.ends_with(".tmp"))
            })
            .collect()
    }

    fn remove_file(path: &Path) {
        match std::fs::remove_file(path) {
            Ok(()) => log::info!("Removed {}", path.display()),
            Err(e) => log::warn!("Could not remove {}: {e}", path.display()),
        }
    }
}
