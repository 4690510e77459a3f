use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use wares_catalog::{NewProduct, Product};
use wares_core::{Page, PageRequest};

// -------------------------
// Request DTOs
// -------------------------

/// Body for create and update; the id comes from the path (update) or the
/// store (create), never from the body.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock_quantity: u32,
}

impl ProductRequest {
    pub fn into_new_product(self) -> NewProduct {
        NewProduct {
            name: self.name,
            description: self.description,
            price: self.price,
            stock_quantity: self.stock_quantity,
        }
    }
}

fn default_page_size() -> u32 {
    10
}

fn default_sort_by() -> String {
    "id".to_string()
}

fn default_sort_dir() -> String {
    "asc".to_string()
}

#[derive(Debug, Deserialize)]
pub struct PaginatedParams {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub size: u32,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default = "default_sort_dir")]
    pub sort_dir: String,
}

#[derive(Debug, Deserialize)]
pub struct NameSearchParams {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct KeywordSearchParams {
    pub keyword: String,
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub size: u32,
}

impl KeywordSearchParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.size)
    }
}

#[derive(Debug, Deserialize)]
pub struct PriceRangeParams {
    pub min_price: Decimal,
    pub max_price: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct ThresholdParams {
    pub threshold: u32,
}

// -------------------------
// Response mapping
// -------------------------

pub fn product_to_json(product: &Product) -> serde_json::Value {
    json!({
        "id": product.id.as_i64(),
        "name": product.name,
        "description": product.description,
        "price": product.price,
        "stock_quantity": product.stock_quantity,
    })
}

pub fn page_to_json(page: &Page<Product>, index: u32, size: u32) -> serde_json::Value {
    json!({
        "items": page.items.iter().map(product_to_json).collect::<Vec<_>>(),
        "total_count": page.total,
        "page": index,
        "size": size,
    })
}
