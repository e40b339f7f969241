//! # In-Memory Store
//!
//! In-memory [`PriceStore`] for testing. Mirrors the SQL semantics of the
//! Postgres store, including pg_trgm-style trigram similarity for the fuzzy
//! area lookup.

use std::collections::HashSet;

use axum::async_trait;

use crate::config::DEFAULT_SIMILARITY_THRESHOLD;
use crate::model::{PackItem, Treatment, BUNDLE_LABEL};

use super::{PriceStore, StoreResult};

/// A `laserum_pack` row before the join resolves the treatment name
#[derive(Debug, Clone)]
pub struct PackLink {
    pub id: i64,
    pub product_id: i64,
    pub treatment_id: i64,
}

/// In-memory price store seeded with fixture rows
pub struct InMemoryStore {
    treatments: Vec<Treatment>,
    pack_links: Vec<PackLink>,
    similarity_threshold: f32,
}

impl InMemoryStore {
    pub fn new(treatments: Vec<Treatment>, pack_links: Vec<PackLink>) -> Self {
        Self {
            treatments,
            pack_links,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, similarity_threshold: f32) -> Self {
        self.similarity_threshold = similarity_threshold;
        self
    }
}

/// Trigram set of a string: each alphanumeric word lowercased, padded with
/// two leading and one trailing space, then split into 3-grams. Matches the
/// pg_trgm extraction rules.
fn trigram_set(text: &str) -> HashSet<String> {
    let lower = text.to_lowercase();
    let mut set = HashSet::new();

    for word in lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
    {
        let padded: Vec<char> = format!("  {} ", word).chars().collect();
        for gram in padded.windows(3) {
            set.insert(gram.iter().collect());
        }
    }

    set
}

/// Trigram similarity of two strings: shared trigrams over total distinct
/// trigrams, as pg_trgm's `similarity()` computes it.
pub fn similarity(a: &str, b: &str) -> f32 {
    let grams_a = trigram_set(a);
    let grams_b = trigram_set(b);

    if grams_a.is_empty() || grams_b.is_empty() {
        return 0.0;
    }

    let shared = grams_a.intersection(&grams_b).count();
    let total = grams_a.union(&grams_b).count();

    shared as f32 / total as f32
}

#[async_trait]
impl PriceStore for InMemoryStore {
    async fn fuzzy_area_lookup(
        &self,
        area: &str,
        bundle: &str,
        customer_type: &str,
    ) -> StoreResult<Option<Treatment>> {
        let mut best: Option<(f32, &Treatment)> = None;

        for treatment in self
            .treatments
            .iter()
            .filter(|t| t.product_bundle == bundle && t.customer_type == customer_type)
        {
            let score = similarity(&treatment.name, area);
            if score < self.similarity_threshold {
                continue;
            }

            // score descending, id ascending on ties
            let replace = match best {
                None => true,
                Some((best_score, best_row)) => {
                    score > best_score || (score == best_score && treatment.id < best_row.id)
                }
            };
            if replace {
                best = Some((score, treatment));
            }
        }

        Ok(best.map(|(_, treatment)| treatment.clone()))
    }

    async fn prices_by_size(&self, size: &str) -> StoreResult<Vec<Treatment>> {
        let wanted = size.to_lowercase();
        let mut rows: Vec<Treatment> = self
            .treatments
            .iter()
            .filter(|t| t.size.to_lowercase() == wanted)
            .cloned()
            .collect();

        rows.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| a.product_bundle.cmp(&b.product_bundle))
        });

        Ok(rows)
    }

    async fn top_bundle(&self) -> StoreResult<Option<Treatment>> {
        let top = self
            .treatments
            .iter()
            .filter(|t| t.product_bundle == BUNDLE_LABEL)
            .max_by(|a, b| {
                a.price
                    .partial_cmp(&b.price)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .cloned();

        Ok(top)
    }

    async fn bundle_items(&self, product_id: i64) -> StoreResult<Vec<PackItem>> {
        let mut items: Vec<PackItem> = self
            .pack_links
            .iter()
            .filter(|link| link.product_id == product_id)
            .filter_map(|link| {
                // inner join: links without a treatment row drop out
                self.treatments
                    .iter()
                    .find(|t| t.id == link.treatment_id)
                    .map(|t| PackItem {
                        id: link.id,
                        product_id: link.product_id,
                        treatment_id: link.treatment_id,
                        name: t.name.clone(),
                    })
            })
            .collect();

        items.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn treatment(id: i64, name: &str, bundle: &str, customer_type: &str, size: &str, price: f64) -> Treatment {
        Treatment {
            id,
            name: name.to_string(),
            product_bundle: bundle.to_string(),
            customer_type: customer_type.to_string(),
            size: size.to_string(),
            price,
        }
    }

    fn sample_store() -> InMemoryStore {
        InMemoryStore::new(
            vec![
                treatment(1, "legs", "single", "F", "medium", 1200.0),
                treatment(2, "legs", "single", "M", "large", 1400.0),
                treatment(3, "arms", "single", "F", "medium", 800.0),
                treatment(4, "full body pack", BUNDLE_LABEL, "F", "large", 4500.0),
                treatment(5, "summer pack", BUNDLE_LABEL, "F", "medium", 3900.0),
            ],
            vec![
                PackLink { id: 1, product_id: 80, treatment_id: 3 },
                PackLink { id: 2, product_id: 80, treatment_id: 1 },
                PackLink { id: 3, product_id: 80, treatment_id: 5 },
                PackLink { id: 4, product_id: 81, treatment_id: 999 },
            ],
        )
    }

    #[test]
    fn test_similarity_identical() {
        assert_eq!(similarity("legs", "legs"), 1.0);
    }

    #[test]
    fn test_similarity_close_match_passes_default_threshold() {
        let score = similarity("legs", "leg");
        assert!(score >= DEFAULT_SIMILARITY_THRESHOLD, "score was {score}");
        assert!(score < 1.0);
    }

    #[test]
    fn test_similarity_unrelated_is_low() {
        assert!(similarity("legs", "xyzzy") < DEFAULT_SIMILARITY_THRESHOLD);
    }

    #[test]
    fn test_similarity_empty_input() {
        assert_eq!(similarity("", "legs"), 0.0);
    }

    #[tokio::test]
    async fn test_fuzzy_lookup_filters_and_ranks() {
        let store = sample_store();

        let row = store.fuzzy_area_lookup("leg", "single", "F").await.unwrap();
        assert_eq!(row.unwrap().id, 1);

        // same area text, different customer type
        let row = store.fuzzy_area_lookup("leg", "single", "M").await.unwrap();
        assert_eq!(row.unwrap().id, 2);
    }

    #[tokio::test]
    async fn test_fuzzy_lookup_no_equality_match() {
        let store = sample_store();

        let row = store.fuzzy_area_lookup("legs", "single", "X").await.unwrap();
        assert!(row.is_none());
    }

    #[tokio::test]
    async fn test_fuzzy_lookup_below_threshold() {
        let store = sample_store();

        let row = store.fuzzy_area_lookup("xyzzy", "single", "F").await.unwrap();
        assert!(row.is_none());
    }

    #[tokio::test]
    async fn test_fuzzy_lookup_tie_breaks_to_lowest_id() {
        let store = InMemoryStore::new(
            vec![
                treatment(7, "back", "single", "F", "large", 900.0),
                treatment(2, "back", "single", "F", "small", 700.0),
            ],
            Vec::new(),
        );

        let row = store.fuzzy_area_lookup("back", "single", "F").await.unwrap();
        assert_eq!(row.unwrap().id, 2);
    }

    #[tokio::test]
    async fn test_by_size_is_case_insensitive_and_ordered() {
        let store = sample_store();

        let lower = store.prices_by_size("medium").await.unwrap();
        let mixed = store.prices_by_size("Medium").await.unwrap();
        assert_eq!(lower, mixed);

        let ids: Vec<i64> = lower.iter().map(|t| t.id).collect();
        // name ascending: arms, legs, summer pack
        assert_eq!(ids, vec![3, 1, 5]);
    }

    #[tokio::test]
    async fn test_by_size_unknown_is_empty() {
        let store = sample_store();
        assert!(store.prices_by_size("tiny").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_top_bundle_picks_highest_price() {
        let store = sample_store();

        let top = store.top_bundle().await.unwrap().unwrap();
        assert_eq!(top.id, 4);
        assert_eq!(top.product_bundle, BUNDLE_LABEL);
    }

    #[tokio::test]
    async fn test_bundle_items_joins_and_orders_by_name() {
        let store = sample_store();

        let items = store.bundle_items(80).await.unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["arms", "legs", "summer pack"]);
        assert!(items.iter().all(|i| i.product_id == 80));
    }

    #[tokio::test]
    async fn test_bundle_items_dangling_link_drops_out() {
        let store = sample_store();

        // product 81's only link points at a missing treatment
        assert!(store.bundle_items(81).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bundle_items_unknown_product() {
        let store = sample_store();
        assert!(store.bundle_items(999).await.unwrap().is_empty());
    }
}
