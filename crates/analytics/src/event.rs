//! Analytics event values.

use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

use wares_core::ProductId;

const CATEGORY_PRODUCT: &str = "product";

/// A named event plus its parameter map.
///
/// Ephemeral: built by the catalog service, consumed once by the notifier,
/// discarded. Parameter order is irrelevant, so a sorted map keeps the
/// rendered output deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsEvent {
    pub name: String,
    pub params: BTreeMap<String, JsonValue>,
}

impl AnalyticsEvent {
    pub fn new(name: impl Into<String>, params: BTreeMap<String, JsonValue>) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    fn product_action(
        event_name: &str,
        action: &str,
        product_id: ProductId,
        product_name: &str,
    ) -> Self {
        let mut params = BTreeMap::new();
        params.insert("product_id".to_string(), product_id.as_i64().into());
        params.insert("product_name".to_string(), product_name.into());
        params.insert("event_category".to_string(), CATEGORY_PRODUCT.into());
        params.insert("event_action".to_string(), action.into());
        Self::new(event_name, params)
    }

    pub fn product_view(product_id: ProductId, product_name: &str) -> Self {
        Self::product_action("product_view", "view", product_id, product_name)
    }

    pub fn product_create(product_id: ProductId, product_name: &str) -> Self {
        Self::product_action("product_create", "create", product_id, product_name)
    }

    pub fn product_update(product_id: ProductId, product_name: &str) -> Self {
        Self::product_action("product_update", "update", product_id, product_name)
    }

    pub fn product_delete(product_id: ProductId, product_name: &str) -> Self {
        Self::product_action("product_delete", "delete", product_id, product_name)
    }

    pub fn product_search(search_term: &str, results_count: u64) -> Self {
        let mut params = BTreeMap::new();
        params.insert("search_term".to_string(), search_term.into());
        params.insert("results_count".to_string(), results_count.into());
        params.insert("event_category".to_string(), CATEGORY_PRODUCT.into());
        params.insert("event_action".to_string(), "search".into());
        Self::new("product_search", params)
    }

    pub fn product_list_view(product_count: u64, list_type: &str) -> Self {
        let mut params = BTreeMap::new();
        params.insert("product_count".to_string(), product_count.into());
        params.insert("list_type".to_string(), list_type.into());
        params.insert("event_category".to_string(), CATEGORY_PRODUCT.into());
        params.insert("event_action".to_string(), "list_view".into());
        Self::new("product_list_view", params)
    }
}
