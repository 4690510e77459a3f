//! Product persistence.
//!
//! [`ProductStore`] is the storage seam: the in-memory implementation backs
//! tests and dev, the Postgres implementation backs production. Both must
//! agree on semantics — absence from `get` is normal, `update`/`delete` on a
//! missing id are `NotFound`, matching is case-insensitive, price bounds are
//! inclusive, and the stock threshold is strict less-than.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryProductStore;
pub use postgres::PostgresProductStore;

use async_trait::async_trait;
use rust_decimal::Decimal;

use wares_core::{CatalogResult, Page, PageRequest, ProductId, SortDirection, SortField};

use crate::product::{NewProduct, Product};

/// Persistence contract for products.
///
/// Individual operations are atomic (single-row read/write); no cross-call
/// transaction is defined. Conflicting concurrent writes are serialized by
/// the backend at row granularity.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Assign an id, persist, and return the stored record.
    async fn create(&self, new: NewProduct) -> CatalogResult<Product>;

    /// Look up a product; absence is the normal signal, not an error.
    async fn get(&self, id: ProductId) -> CatalogResult<Option<Product>>;

    /// Overwrite every mutable field. `NotFound` if the id does not exist.
    async fn update(&self, id: ProductId, fields: NewProduct) -> CatalogResult<Product>;

    /// Remove a product. `NotFound` if the id does not exist.
    async fn delete(&self, id: ProductId) -> CatalogResult<()>;

    /// All products in ascending id order.
    async fn list_all(&self) -> CatalogResult<Vec<Product>>;

    /// One page of the full listing; `Page::total` is the unfiltered count.
    async fn list_page(
        &self,
        page: PageRequest,
        field: SortField,
        direction: SortDirection,
    ) -> CatalogResult<Page<Product>>;

    /// Case-insensitive substring match on name; empty needle matches all.
    async fn search_by_name(&self, name: &str) -> CatalogResult<Vec<Product>>;

    /// Case-insensitive substring match across name OR description,
    /// paginated; `Page::total` is the filtered count.
    async fn search_keyword(&self, keyword: &str, page: PageRequest) -> CatalogResult<Page<Product>>;

    /// Products priced within `[min, max]`, bounds inclusive.
    async fn by_price_range(&self, min: Decimal, max: Decimal) -> CatalogResult<Vec<Product>>;

    /// Products with stock strictly below the threshold.
    async fn by_stock_below(&self, threshold: u32) -> CatalogResult<Vec<Product>>;

    /// Count of products with stock strictly below the threshold.
    async fn count_stock_below(&self, threshold: u32) -> CatalogResult<u64>;
}
