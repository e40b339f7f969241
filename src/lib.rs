//! laserum-api - read-only pricing API over the laserum treatment catalogue
//!
//! A small REST facade translating HTTP queries into parameterized SQL
//! lookups against the `trengo.laserum` tables, gated by a static API key.

pub mod config;
pub mod http;
pub mod model;
pub mod store;

pub use config::AppConfig;
pub use http::server::{serve, ApiServer, ServeError};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Load config from the environment and run the server.
pub async fn run() -> Result<(), ServeError> {
    init_tracing();

    let config = AppConfig::from_env()?;
    serve(config).await
}
