//! REST surface of the memory service.

pub mod error;
pub mod extract;
pub mod routes;
pub mod types;

use crate::MemoryApi;
use axum::http::HeaderValue;
use axum::routing::{delete, get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

pub fn router(api: Arc<MemoryApi>, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(routes::status))
        .route("/memory/add", post(routes::add_memory))
        .route("/memory/bulk-add", post(routes::bulk_add_memories))
        .route("/memory/search", post(routes::search_memories))
        .route("/memory/list", get(routes::list_memories))
        .route("/memory/clear", delete(routes::clear_all))
        .with_state(api)
        .layer(cors_layer(cors_origins))
}

/// Fixed origin list with credentials. Methods and headers are mirrored
/// from the preflight since wildcards are not allowed with credentials.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("Ignoring invalid CORS origin: {origin}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
