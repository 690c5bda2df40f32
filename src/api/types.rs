use crate::domain::entities::memory::Memory;
use serde::{Deserialize, Serialize};

pub const SERVICE_NAME: &str = "Memory API";

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub service: &'static str,
    pub status: &'static str,
    /// Field name kept for existing clients.
    #[serde(rename = "leann_available")]
    pub index_available: bool,
    pub total_memories: usize,
}

#[derive(Debug, Serialize)]
pub struct AddResponse {
    pub ok: bool,
    pub memory_id: String,
    pub total_memories: usize,
}

#[derive(Debug, Deserialize)]
pub struct BulkAddRequest {
    pub memories: Vec<Memory>,
}

#[derive(Debug, Serialize)]
pub struct BulkAddResponse {
    pub ok: bool,
    pub added: usize,
    pub total_memories: usize,
}

fn default_k() -> usize {
    5
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub memory_id: String,
    #[serde(default = "default_k")]
    pub k: usize,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub related_ids: Vec<String>,
    pub scores: Vec<f64>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub memory_ids: Vec<String>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub ok: bool,
    pub message: &'static str,
}
