//! # Bundle Routes
//!
//! Bundle contents lookup: pack items joined to their treatment names.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::store::PriceStore;

use super::errors::{ApiError, ApiResult};
use super::response::PackContents;
use super::server::ApiServer;

const NO_PACK_ROWS: &str = "No products found for this bundle";

/// Create bundle routes
pub fn bundle_routes<S: PriceStore + 'static>(state: Arc<ApiServer<S>>) -> Router {
    Router::new()
        .route("/bundles/:id", get(bundle_contents))
        .with_state(state)
}

/// Items of one bundle with their treatment names and the total count
async fn bundle_contents<S: PriceStore + 'static>(
    State(server): State<Arc<ApiServer<S>>>,
    Path(id): Path<String>,
) -> ApiResult<Json<PackContents>> {
    let product_id: i64 = id.parse().map_err(|_| ApiError::InvalidProductId)?;

    let items = server
        .store
        .bundle_items(product_id)
        .await
        .map_err(ApiError::PackLookup)?;

    if items.is_empty() {
        return Err(ApiError::NotFound(NO_PACK_ROWS));
    }

    Ok(Json(PackContents::new(product_id, items)))
}
