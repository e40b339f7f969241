//! # Price Store
//!
//! Storage seam between the HTTP handlers and the catalogue tables. The
//! production implementation runs parameterized SQL against Postgres; the
//! in-memory implementation mirrors the same semantics for tests.

pub mod memory;
pub mod postgres;

use axum::async_trait;
use thiserror::Error;

use crate::model::{PackItem, Treatment};

pub use memory::InMemoryStore;
pub use postgres::PgStore;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from the storage backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// Connection or query failure in the database client
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Read operations over the treatment catalogue
#[async_trait]
pub trait PriceStore: Send + Sync {
    /// Best similarity match of `area` against treatment names, filtered by
    /// exact bundle label and customer type. Ties on score break toward the
    /// lowest id.
    async fn fuzzy_area_lookup(
        &self,
        area: &str,
        bundle: &str,
        customer_type: &str,
    ) -> StoreResult<Option<Treatment>>;

    /// All treatments whose size matches case-insensitively, ordered by
    /// name then bundle label.
    async fn prices_by_size(&self, size: &str) -> StoreResult<Vec<Treatment>>;

    /// The single highest-priced bundled package.
    async fn top_bundle(&self) -> StoreResult<Option<Treatment>>;

    /// Items of one bundle, annotated with treatment names, ordered by
    /// treatment name.
    async fn bundle_items(&self, product_id: i64) -> StoreResult<Vec<PackItem>>;
}
