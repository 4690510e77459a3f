//! In-memory product store.
//!
//! Intended for tests/dev. Not optimized for performance.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use rust_decimal::Decimal;

use wares_core::{CatalogError, CatalogResult, Page, PageRequest, ProductId, SortDirection, SortField};

use crate::product::{NewProduct, Product};
use crate::store::ProductStore;

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    rows: BTreeMap<i64, Product>,
}

/// RwLock'd map keyed by id; the BTreeMap keeps `list_all` in stable
/// ascending id order for free.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    inner: RwLock<Inner>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> CatalogResult<std::sync::RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| CatalogError::storage("lock poisoned"))
    }

    fn write(&self) -> CatalogResult<std::sync::RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| CatalogError::storage("lock poisoned"))
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn sort_products(items: &mut [Product], field: SortField, direction: SortDirection) {
    items.sort_by(|a, b| {
        let ordering = match field {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Name => a.name.cmp(&b.name),
            SortField::Price => a.price.cmp(&b.price),
            SortField::StockQuantity => a.stock_quantity.cmp(&b.stock_quantity),
        };
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

fn paginate(items: Vec<Product>, page: PageRequest) -> Page<Product> {
    let total = items.len() as u64;
    let items = items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.size as usize)
        .collect();
    Page::new(items, total)
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn create(&self, new: NewProduct) -> CatalogResult<Product> {
        let mut inner = self.write()?;
        inner.next_id += 1;
        let product = new.into_product(ProductId::new(inner.next_id));
        inner.rows.insert(product.id.as_i64(), product.clone());
        Ok(product)
    }

    async fn get(&self, id: ProductId) -> CatalogResult<Option<Product>> {
        Ok(self.read()?.rows.get(&id.as_i64()).cloned())
    }

    async fn update(&self, id: ProductId, fields: NewProduct) -> CatalogResult<Product> {
        let mut inner = self.write()?;
        match inner.rows.get_mut(&id.as_i64()) {
            Some(existing) => {
                *existing = fields.into_product(id);
                Ok(existing.clone())
            }
            None => Err(CatalogError::NotFound),
        }
    }

    async fn delete(&self, id: ProductId) -> CatalogResult<()> {
        let mut inner = self.write()?;
        match inner.rows.remove(&id.as_i64()) {
            Some(_) => Ok(()),
            None => Err(CatalogError::NotFound),
        }
    }

    async fn list_all(&self) -> CatalogResult<Vec<Product>> {
        Ok(self.read()?.rows.values().cloned().collect())
    }

    async fn list_page(
        &self,
        page: PageRequest,
        field: SortField,
        direction: SortDirection,
    ) -> CatalogResult<Page<Product>> {
        let mut items: Vec<Product> = self.read()?.rows.values().cloned().collect();
        sort_products(&mut items, field, direction);
        Ok(paginate(items, page))
    }

    async fn search_by_name(&self, name: &str) -> CatalogResult<Vec<Product>> {
        Ok(self
            .read()?
            .rows
            .values()
            .filter(|p| contains_ignore_case(&p.name, name))
            .cloned()
            .collect())
    }

    async fn search_keyword(&self, keyword: &str, page: PageRequest) -> CatalogResult<Page<Product>> {
        let items: Vec<Product> = self
            .read()?
            .rows
            .values()
            .filter(|p| {
                contains_ignore_case(&p.name, keyword)
                    || p.description
                        .as_deref()
                        .is_some_and(|d| contains_ignore_case(d, keyword))
            })
            .cloned()
            .collect();
        Ok(paginate(items, page))
    }

    async fn by_price_range(&self, min: Decimal, max: Decimal) -> CatalogResult<Vec<Product>> {
        Ok(self
            .read()?
            .rows
            .values()
            .filter(|p| p.price >= min && p.price <= max)
            .cloned()
            .collect())
    }

    async fn by_stock_below(&self, threshold: u32) -> CatalogResult<Vec<Product>> {
        Ok(self
            .read()?
            .rows
            .values()
            .filter(|p| p.stock_quantity < threshold)
            .cloned()
            .collect())
    }

    async fn count_stock_below(&self, threshold: u32) -> CatalogResult<u64> {
        Ok(self
            .read()?
            .rows
            .values()
            .filter(|p| p.stock_quantity < threshold)
            .count() as u64)
    }
}
