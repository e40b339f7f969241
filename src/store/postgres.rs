//! # Postgres Store
//!
//! sqlx-backed [`PriceStore`] running one parameterized statement per
//! operation against the external `trengo` schema.

use axum::async_trait;
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::model::{PackItem, Treatment, BUNDLE_LABEL};

use super::{PriceStore, StoreResult};

const FUZZY_AREA_SQL: &str = "SELECT id, name, product_bundle, customer_type, size, price \
     FROM trengo.laserum \
     WHERE similarity(name, $1) >= $4 \
       AND product_bundle = $2 \
       AND customer_type = $3 \
     ORDER BY similarity(name, $1) DESC, id ASC \
     LIMIT 1";

const BY_SIZE_SQL: &str = "SELECT id, name, product_bundle, customer_type, size, price \
     FROM trengo.laserum \
     WHERE LOWER(size) = LOWER($1) \
     ORDER BY name, product_bundle";

const TOP_BUNDLE_SQL: &str = "SELECT id, name, product_bundle, customer_type, size, price \
     FROM trengo.laserum \
     WHERE product_bundle = $1 \
     ORDER BY price DESC \
     LIMIT 1";

const BUNDLE_ITEMS_SQL: &str = "SELECT lp.id, lp.product_id, lp.treatment_id, l.name \
     FROM trengo.laserum_pack lp \
     INNER JOIN trengo.laserum l ON l.id = lp.treatment_id \
     WHERE lp.product_id = $1 \
     ORDER BY l.name";

/// Postgres-backed price store
pub struct PgStore {
    pool: PgPool,
    similarity_threshold: f32,
}

impl PgStore {
    pub fn new(pool: PgPool, similarity_threshold: f32) -> Self {
        Self {
            pool,
            similarity_threshold,
        }
    }

    /// Connect a pool using the configured database URL.
    pub async fn connect(config: &AppConfig) -> StoreResult<Self> {
        let pool = PgPool::connect(&config.database_url).await?;
        Ok(Self::new(pool, config.similarity_threshold))
    }
}

#[async_trait]
impl PriceStore for PgStore {
    async fn fuzzy_area_lookup(
        &self,
        area: &str,
        bundle: &str,
        customer_type: &str,
    ) -> StoreResult<Option<Treatment>> {
        let row = sqlx::query_as::<_, Treatment>(FUZZY_AREA_SQL)
            .bind(area)
            .bind(bundle)
            .bind(customer_type)
            .bind(self.similarity_threshold)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn prices_by_size(&self, size: &str) -> StoreResult<Vec<Treatment>> {
        let rows = sqlx::query_as::<_, Treatment>(BY_SIZE_SQL)
            .bind(size)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn top_bundle(&self) -> StoreResult<Option<Treatment>> {
        let row = sqlx::query_as::<_, Treatment>(TOP_BUNDLE_SQL)
            .bind(BUNDLE_LABEL)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn bundle_items(&self, product_id: i64) -> StoreResult<Vec<PackItem>> {
        let rows = sqlx::query_as::<_, PackItem>(BUNDLE_ITEMS_SQL)
            .bind(product_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}
