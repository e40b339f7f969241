//! # HTTP Server
//!
//! Router assembly and server bootstrap. Price and bundle routes sit behind
//! the API key gate; the health check is public at root level.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{middleware, Json, Router};
use serde::Serialize;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{AppConfig, ConfigError};
use crate::store::{PgStore, PriceStore, StoreError};

use super::auth::{require_api_key, ApiKeyAuth};
use super::bundle_routes::bundle_routes;
use super::price_routes::price_routes;

/// API server state shared across handlers
pub struct ApiServer<S: PriceStore> {
    pub store: Arc<S>,
    pub auth: ApiKeyAuth,
}

impl<S: PriceStore + 'static> ApiServer<S> {
    pub fn new(store: S, auth: ApiKeyAuth) -> Self {
        Self {
            store: Arc::new(store),
            auth,
        }
    }

    /// Build the Axum router
    pub fn router(self) -> Router {
        let auth = self.auth.clone();
        let state = Arc::new(self);

        let protected = Router::new()
            .merge(price_routes(state.clone()))
            .merge(bundle_routes(state))
            .layer(middleware::from_fn_with_state(auth, require_api_key));

        Router::new()
            .merge(health_routes())
            .merge(protected)
            .layer(TraceLayer::new_for_http())
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Create health routes (public, no API key required)
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

/// Health check handler
async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

/// Configure CORS from config; an empty origin list is permissive
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = origins.iter().filter_map(|s| s.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Errors that can stop the server from coming up or running
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("invalid listen address: {0}")]
    Addr(#[from] std::net::AddrParseError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Connect the store and serve the API until the process is stopped.
pub async fn serve(config: AppConfig) -> Result<(), ServeError> {
    let store = PgStore::connect(&config).await?;
    let auth = ApiKeyAuth::new(config.api_key.clone());
    let cors = cors_layer(&config.cors_origins);

    let app = ApiServer::new(store, auth).router().layer(cors);

    let addr: SocketAddr = config.socket_addr().parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "price API listening");

    axum::serve(listener, app).await?;

    Ok(())
}
