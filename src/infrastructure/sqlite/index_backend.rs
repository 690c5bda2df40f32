//! Flat (exhaustive) vector index persisted as a single SQLite file.

use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use crate::domain::ports::index_backend::{BuildRequest, IndexBackend, SearchHit};
use crate::infrastructure::sqlite::schema::{
    create_schema, read_meta, write_meta, META_BACKEND, META_BUILT_AT, META_DIMENSION,
    META_EMBEDDING_MODEL, META_PASSAGE_COUNT,
};
use async_trait::async_trait;
use rusqlite::{params, Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const BACKEND_NAME: &str = "flat";

const EMBED_BATCH: usize = 32;

struct StoredPassage {
    text: String,
    metadata: serde_json::Value,
    vector: Vec<f32>,
}

pub struct SqliteIndexBackend {
    embedder: Arc<dyn EmbeddingProvider>,
}

impl SqliteIndexBackend {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self { embedder }
    }

    fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
        if a.len() != b.len() || a.is_empty() {
            return 0.0;
        }
        let mut dot = 0.0_f64;
        let mut norm_a = 0.0_f64;
        let mut norm_b = 0.0_f64;
        for (x, y) in a.iter().zip(b.iter()) {
            let x = *x as f64;
            let y = *y as f64;
            dot += x * y;
            norm_a += x * x;
            norm_b += y * y;
        }
        let denom = norm_a.sqrt() * norm_b.sqrt();
        if denom == 0.0 { 0.0 } else { dot / denom }
    }

    fn serialize_vector(v: &[f32]) -> Vec<u8> {
        v.iter().flat_map(|f| f.to_le_bytes()).collect()
    }

    fn deserialize_vector(bytes: &[u8]) -> Vec<f32> {
        bytes.chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect()
    }

    /// Sibling path the build writes to before renaming over `path`.
    fn staging_path(path: &Path) -> Result<PathBuf, DomainError> {
        let name = path
            .file_name()
            .ok_or_else(|| DomainError::IndexBuild(format!("invalid index path: {}", path.display())))?;
        Ok(path.with_file_name(format!(
            "{}.{}.tmp",
            name.to_string_lossy(),
            uuid::Uuid::new_v4().simple()
        )))
    }

    fn write_index(
        path: &Path,
        request: &BuildRequest,
        vectors: &[Vec<f32>],
    ) -> Result<(), DomainError> {
        let mut conn = Connection::open(path)?;
        create_schema(&conn)?;

        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO passages (seq, text, metadata, vector) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for (seq, (passage, vector)) in request.passages.iter().zip(vectors).enumerate() {
                stmt.execute(params![
                    seq as i64,
                    passage.text,
                    serde_json::to_string(&passage.metadata)?,
                    Self::serialize_vector(vector),
                ])?;
            }
        }
        let dimension = vectors.first().map(|v| v.len()).unwrap_or(0);
        write_meta(&tx, META_EMBEDDING_MODEL, &request.embedding_model)?;
        write_meta(&tx, META_BACKEND, &request.backend_name)?;
        write_meta(&tx, META_DIMENSION, &dimension.to_string())?;
        write_meta(&tx, META_PASSAGE_COUNT, &request.passages.len().to_string())?;
        write_meta(&tx, META_BUILT_AT, &chrono::Utc::now().to_rfc3339())?;
        tx.commit()?;
        Ok(())
    }

    fn read_index(path: &Path) -> Result<(Option<String>, Vec<StoredPassage>), DomainError> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        let model = read_meta(&conn, META_EMBEDDING_MODEL)?;

        let mut stmt = conn.prepare("SELECT text, metadata, vector FROM passages ORDER BY seq")?;
        let rows = stmt
            .query_map([], |row| {
                let text: String = row.get(0)?;
                let metadata: String = row.get(1)?;
                let blob: Vec<u8> = row.get(2)?;
                Ok((text, metadata, blob))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut passages = Vec::with_capacity(rows.len());
        for (text, metadata, blob) in rows {
            passages.push(StoredPassage {
                text,
                metadata: serde_json::from_str(&metadata)?,
                vector: Self::deserialize_vector(&blob),
            });
        }
        Ok((model, passages))
    }
}

#[async_trait]
impl IndexBackend for SqliteIndexBackend {
    fn name(&self) -> &str {
        BACKEND_NAME
    }

    async fn build(&self, request: BuildRequest, path: &Path) -> Result<(), DomainError> {
        if request.embedding_model != self.embedder.model() {
            return Err(DomainError::IndexBuild(format!(
                "requested embedding model '{}' but backend embeds with '{}'",
                request.embedding_model,
                self.embedder.model()
            )));
        }

        let mut vectors = Vec::with_capacity(request.passages.len());
        for chunk in request.passages.chunks(EMBED_BATCH) {
            let texts: Vec<String> = chunk.iter().map(|p| p.text.clone()).collect();
            let batch = self
                .embedder
                .embed(&texts, InputType::Document)
                .await
                .map_err(|e| DomainError::IndexBuild(e.into_message()))?;
            if batch.len() != chunk.len() {
                return Err(DomainError::IndexBuild(format!(
                    "embedding provider returned {} vectors for {} texts",
                    batch.len(),
                    chunk.len()
                )));
            }
            vectors.extend(batch);
        }

        let staging = Self::staging_path(path)?;
        let target = path.to_path_buf();
        tokio::task::spawn_blocking(move || {
            let written = Self::write_index(&staging, &request, &vectors)
                .and_then(|_| std::fs::rename(&staging, &target).map_err(DomainError::from));
            if written.is_err() {
                let _ = std::fs::remove_file(&staging);
            }
            written
        })
        .await
        .map_err(|e| DomainError::IndexBuild(format!("build task failed: {e}")))?
        .map_err(|e| DomainError::IndexBuild(e.into_message()))
    }

    async fn search(&self, path: &Path, query: &str, top_k: usize) -> Result<Vec<SearchHit>, DomainError> {
        if !path.exists() {
            return Err(DomainError::IndexMissing(path.display().to_string()));
        }

        let source = path.to_path_buf();
        let (model, passages) = tokio::task::spawn_blocking(move || Self::read_index(&source))
            .await
            .map_err(|e| DomainError::Query(format!("search task failed: {e}")))?
            .map_err(|e| DomainError::Query(e.into_message()))?;

        if let Some(model) = model {
            if model != self.embedder.model() {
                return Err(DomainError::Query(format!(
                    "index at {} was built with '{}' but the service embeds with '{}'; rebuild it",
                    path.display(),
                    model,
                    self.embedder.model()
                )));
            }
        }

        if top_k == 0 || passages.is_empty() {
            return Ok(vec![]);
        }

        let query_vector = self
            .embedder
            .embed(&[query.to_string()], InputType::Query)
            .await
            .map_err(|e| DomainError::Query(e.into_message()))?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::Query("embedding provider returned no vector".into()))?;

        let mut hits: Vec<SearchHit> = passages
            .into_iter()
            .map(|p| SearchHit {
                score: Self::cosine_similarity(&query_vector, &p.vector),
                text: p.text,
                metadata: p.metadata,
            })
            .collect();

        // Stable: equal scores keep build order.
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(top_k);
        Ok(hits)
    }
}
