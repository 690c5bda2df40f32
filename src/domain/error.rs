use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Memory {0} not found")]
    NotFound(String),

    #[error("Semantic index not available - semantic search disabled ({0})")]
    IndexUnavailable(String),

    #[error("No index at {0}")]
    IndexMissing(String),

    #[error("Index build failed: {0}")]
    IndexBuild(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl DomainError {
    /// The underlying message without this error's own prefix, for
    /// re-wrapping into another variant.
    pub fn into_message(self) -> String {
        match self {
            DomainError::NotFound(m)
            | DomainError::IndexUnavailable(m)
            | DomainError::IndexMissing(m)
            | DomainError::IndexBuild(m)
            | DomainError::Query(m)
            | DomainError::Embedding(m)
            | DomainError::Database(m)
            | DomainError::Config(m) => m,
            DomainError::Io(e) => e.to_string(),
        }
    }
}

impl From<rusqlite::Error> for DomainError {
    fn from(e: rusqlite::Error) -> Self {
        DomainError::Database(e.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::Database(format!("metadata encoding: {e}"))
    }
}
