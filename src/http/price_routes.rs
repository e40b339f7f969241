//! # Price Routes
//!
//! The three `/prices` lookups. Parameters are validated before any store
//! call; rows come back as typed records and are shaped here.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::model::Treatment;
use crate::store::PriceStore;

use super::errors::{ApiError, ApiResult};
use super::response::BundleResponse;
use super::server::ApiServer;

const MISSING_PRICE_PARAMS: &str =
    "Please supply all of 'area' and 'bundle' and 'sex' query parameters";
const MISSING_SIZE_PARAM: &str = "Size parameter is required";
const NO_AREA_MATCH: &str = "No close match found for this area/bundle/sex";
const NO_SIZE_MATCH: &str = "No prices found for this size";
const NO_BUNDLES: &str = "No bundles found";

#[derive(Debug, Deserialize)]
pub struct PriceQuery {
    pub area: Option<String>,
    pub bundle: Option<String>,
    pub sex: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SizeQuery {
    pub size: Option<String>,
}

/// Create price routes
pub fn price_routes<S: PriceStore + 'static>(state: Arc<ApiServer<S>>) -> Router {
    Router::new()
        .route("/prices", get(fuzzy_price_lookup))
        .route("/prices/by-size", get(prices_by_size))
        .route("/prices/bundles", get(top_bundle))
        .with_state(state)
}

/// Fuzzy area lookup: best similarity match on name, exact match on bundle
/// label and customer type, at most one row
async fn fuzzy_price_lookup<S: PriceStore + 'static>(
    State(server): State<Arc<ApiServer<S>>>,
    Query(query): Query<PriceQuery>,
) -> ApiResult<Json<Vec<Treatment>>> {
    let (Some(area), Some(bundle), Some(sex)) = (query.area, query.bundle, query.sex) else {
        return Err(ApiError::MissingParams(MISSING_PRICE_PARAMS));
    };

    let row = server
        .store
        .fuzzy_area_lookup(&area, &bundle, &sex)
        .await
        .map_err(ApiError::Database)?;

    match row {
        Some(treatment) => Ok(Json(vec![treatment])),
        None => Err(ApiError::NotFound(NO_AREA_MATCH)),
    }
}

/// Case-insensitive exact size match, all rows
async fn prices_by_size<S: PriceStore + 'static>(
    State(server): State<Arc<ApiServer<S>>>,
    Query(query): Query<SizeQuery>,
) -> ApiResult<Json<Vec<Treatment>>> {
    let Some(size) = query.size else {
        return Err(ApiError::MissingParams(MISSING_SIZE_PARAM));
    };

    let rows = server
        .store
        .prices_by_size(&size)
        .await
        .map_err(ApiError::Database)?;

    if rows.is_empty() {
        return Err(ApiError::NotFound(NO_SIZE_MATCH));
    }

    Ok(Json(rows))
}

/// The single highest-priced bundled package, wrapped in `data`
async fn top_bundle<S: PriceStore + 'static>(
    State(server): State<Arc<ApiServer<S>>>,
) -> ApiResult<Json<BundleResponse>> {
    let row = server.store.top_bundle().await.map_err(ApiError::Database)?;

    match row {
        Some(treatment) => Ok(Json(BundleResponse::new(vec![treatment]))),
        None => Err(ApiError::NotFound(NO_BUNDLES)),
    }
}
