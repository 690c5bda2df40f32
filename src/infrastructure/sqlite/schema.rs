use crate::domain::error::DomainError;
use rusqlite::{params, Connection, OptionalExtension};

pub const META_EMBEDDING_MODEL: &str = "embedding_model";
pub const META_BACKEND: &str = "backend";
pub const META_DIMENSION: &str = "dimension";
pub const META_PASSAGE_COUNT: &str = "passage_count";
pub const META_BUILT_AT: &str = "built_at";

pub fn create_schema(conn: &Connection) -> Result<(), DomainError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS passages (
            seq INTEGER PRIMARY KEY,
            text TEXT NOT NULL,
            metadata TEXT NOT NULL DEFAULT '{}',
            vector BLOB NOT NULL
        );

        CREATE TABLE IF NOT EXISTS index_meta (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        "
    ).map_err(|e| DomainError::Database(format!("Schema creation failed: {e}")))
}

pub fn write_meta(conn: &Connection, key: &str, value: &str) -> Result<(), DomainError> {
    conn.execute(
        "INSERT OR REPLACE INTO index_meta (key, value) VALUES (?1, ?2)",
        params![key, value],
    )?;
    Ok(())
}

pub fn read_meta(conn: &Connection, key: &str) -> Result<Option<String>, DomainError> {
    let value = conn
        .query_row(
            "SELECT value FROM index_meta WHERE key = ?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(value)
}
