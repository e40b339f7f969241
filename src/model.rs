//! # Catalogue Records
//!
//! Typed rows for the two external tables. The service only reads these;
//! row lifecycle is owned by the database.

use serde::Serialize;
use sqlx::FromRow;

/// `product_bundle` label marking a multi-item package. Other labels
/// (e.g. "single") mark individual treatments.
pub const BUNDLE_LABEL: &str = "bundle";

/// A priced treatment row from `trengo.laserum`
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Treatment {
    pub id: i64,
    pub name: String,
    pub product_bundle: String,
    pub customer_type: String,
    pub size: String,
    pub price: f64,
}

/// A pack item from `trengo.laserum_pack`, annotated with the name of the
/// treatment it points at
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct PackItem {
    pub id: i64,
    pub product_id: i64,
    pub treatment_id: i64,
    pub name: String,
}
