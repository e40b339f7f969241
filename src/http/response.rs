//! # Response Shaping
//!
//! Typed response wrappers for the endpoints that do not return a plain
//! array. Rows are mapped through [`crate::model`] records, never passed
//! through untyped.

use serde::Serialize;

use crate::model::{PackItem, Treatment};

/// Bundle query response: at most one row wrapped in `data`
#[derive(Debug, Clone, Serialize)]
pub struct BundleResponse {
    pub data: Vec<Treatment>,
}

impl BundleResponse {
    pub fn new(data: Vec<Treatment>) -> Self {
        Self { data }
    }
}

/// Bundle contents response
#[derive(Debug, Clone, Serialize)]
pub struct PackContents {
    pub product_id: i64,
    pub total_items: usize,
    pub items: Vec<PackItem>,
}

impl PackContents {
    pub fn new(product_id: i64, items: Vec<PackItem>) -> Self {
        let total_items = items.len();
        Self {
            product_id,
            total_items,
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_contents_counts_items() {
        let items = vec![
            PackItem {
                id: 1,
                product_id: 80,
                treatment_id: 3,
                name: "arms".to_string(),
            },
            PackItem {
                id: 2,
                product_id: 80,
                treatment_id: 1,
                name: "legs".to_string(),
            },
        ];

        let response = PackContents::new(80, items);
        assert_eq!(response.total_items, 2);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["product_id"], 80);
        assert_eq!(json["total_items"], 2);
        assert_eq!(json["items"][0]["name"], "arms");
    }

    #[test]
    fn test_bundle_response_wraps_data() {
        let response = BundleResponse::new(Vec::new());
        let json = serde_json::to_value(&response).unwrap();
        assert!(json["data"].as_array().unwrap().is_empty());
    }
}
