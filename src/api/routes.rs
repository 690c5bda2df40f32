//! Axum route handlers for the memory API.

use crate::api::error::ApiError;
use crate::api::extract::ApiJson;
use crate::api::types::*;
use crate::domain::entities::memory::Memory;
use crate::MemoryApi;
use axum::extract::State;
use axum::response::Json;
use std::sync::Arc;

// GET /
pub async fn status(State(api): State<Arc<MemoryApi>>) -> Json<StatusResponse> {
    let status = api.status();
    Json(StatusResponse {
        service: SERVICE_NAME,
        status: "running",
        index_available: status.index_available,
        total_memories: status.total_memories,
    })
}

// POST /memory/add
pub async fn add_memory(
    State(api): State<Arc<MemoryApi>>,
    ApiJson(memory): ApiJson<Memory>,
) -> Result<Json<AddResponse>, ApiError> {
    let outcome = api.add(memory).await?;
    Ok(Json(AddResponse {
        ok: true,
        memory_id: outcome.memory_id,
        total_memories: outcome.total_memories,
    }))
}

// POST /memory/bulk-add
pub async fn bulk_add_memories(
    State(api): State<Arc<MemoryApi>>,
    ApiJson(req): ApiJson<BulkAddRequest>,
) -> Result<Json<BulkAddResponse>, ApiError> {
    let outcome = api.bulk_add(req.memories).await?;
    Ok(Json(BulkAddResponse {
        ok: true,
        added: outcome.added,
        total_memories: outcome.total_memories,
    }))
}

// POST /memory/search
pub async fn search_memories(
    State(api): State<Arc<MemoryApi>>,
    ApiJson(req): ApiJson<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let related = api.related(&req.memory_id, req.k).await?;
    Ok(Json(SearchResponse {
        related_ids: related.related_ids,
        scores: related.scores,
    }))
}

// GET /memory/list
pub async fn list_memories(State(api): State<Arc<MemoryApi>>) -> Json<ListResponse> {
    let memory_ids = api.list_ids();
    Json(ListResponse {
        total: memory_ids.len(),
        memory_ids,
    })
}

// DELETE /memory/clear
pub async fn clear_all(State(api): State<Arc<MemoryApi>>) -> Json<ClearResponse> {
    api.clear().await;
    Json(ClearResponse {
        ok: true,
        message: "All memories cleared",
    })
}
