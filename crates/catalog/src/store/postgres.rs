//! Postgres-backed product store.
//!
//! Single-row CRUD over a `products` table; concurrent writers are serialized
//! by the engine's row-level locking. The sort column for paginated listings
//! is derived from the `SortField` enum, never from raw request input.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use wares_core::{CatalogError, CatalogResult, Page, PageRequest, ProductId, SortDirection, SortField};

use crate::product::{NewProduct, Product};
use crate::store::ProductStore;

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id             BIGSERIAL PRIMARY KEY,
    name           TEXT NOT NULL,
    description    TEXT,
    price          NUMERIC NOT NULL CHECK (price >= 0),
    stock_quantity BIGINT NOT NULL CHECK (stock_quantity >= 0)
)
"#;

const SELECT_COLUMNS: &str = "id, name, description, price, stock_quantity";

/// Product store over a sqlx connection pool.
pub struct PostgresProductStore {
    pool: PgPool,
}

impl PostgresProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a small pool to the given database URL.
    pub async fn connect(url: &str) -> CatalogResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await
            .map_err(db_err)?;
        Ok(Self::new(pool))
    }

    /// Create the `products` table when it does not exist yet.
    pub async fn migrate(&self) -> CatalogResult<()> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}

fn db_err(err: sqlx::Error) -> CatalogError {
    CatalogError::storage(err.to_string())
}

fn row_to_product(row: &PgRow) -> CatalogResult<Product> {
    let stock: i64 = row.try_get("stock_quantity").map_err(db_err)?;
    Ok(Product {
        id: ProductId::new(row.try_get("id").map_err(db_err)?),
        name: row.try_get("name").map_err(db_err)?,
        description: row.try_get("description").map_err(db_err)?,
        price: row.try_get("price").map_err(db_err)?,
        stock_quantity: u32::try_from(stock)
            .map_err(|_| CatalogError::storage("stock_quantity out of range"))?,
    })
}

fn sort_column(field: SortField) -> &'static str {
    match field {
        SortField::Id => "id",
        SortField::Name => "name",
        SortField::Price => "price",
        SortField::StockQuantity => "stock_quantity",
    }
}

fn sort_keyword(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Asc => "ASC",
        SortDirection::Desc => "DESC",
    }
}

fn like_pattern(needle: &str) -> String {
    format!("%{needle}%")
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    async fn create(&self, new: NewProduct) -> CatalogResult<Product> {
        let row = sqlx::query(&format!(
            "INSERT INTO products (name, description, price, stock_quantity) \
             VALUES ($1, $2, $3, $4) RETURNING {SELECT_COLUMNS}"
        ))
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.price)
        .bind(i64::from(new.stock_quantity))
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        row_to_product(&row)
    }

    async fn get(&self, id: ProductId) -> CatalogResult<Option<Product>> {
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(row_to_product).transpose()
    }

    async fn update(&self, id: ProductId, fields: NewProduct) -> CatalogResult<Product> {
        let row = sqlx::query(&format!(
            "UPDATE products SET name = $2, description = $3, price = $4, stock_quantity = $5 \
             WHERE id = $1 RETURNING {SELECT_COLUMNS}"
        ))
        .bind(id.as_i64())
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.price)
        .bind(i64::from(fields.stock_quantity))
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        match row {
            Some(row) => row_to_product(&row),
            None => Err(CatalogError::NotFound),
        }
    }

    async fn delete(&self, id: ProductId) -> CatalogResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::NotFound);
        }
        Ok(())
    }

    async fn list_all(&self) -> CatalogResult<Vec<Product>> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM products ORDER BY id ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(row_to_product).collect()
    }

    async fn list_page(
        &self,
        page: PageRequest,
        field: SortField,
        direction: SortDirection,
    ) -> CatalogResult<Page<Product>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;

        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM products ORDER BY {} {} LIMIT $1 OFFSET $2",
            sort_column(field),
            sort_keyword(direction),
        ))
        .bind(i64::from(page.size))
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        let items = rows.iter().map(row_to_product).collect::<CatalogResult<_>>()?;
        Ok(Page::new(items, total as u64))
    }

    async fn search_by_name(&self, name: &str) -> CatalogResult<Vec<Product>> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM products WHERE name ILIKE $1 ORDER BY id ASC"
        ))
        .bind(like_pattern(name))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(row_to_product).collect()
    }

    async fn search_keyword(&self, keyword: &str, page: PageRequest) -> CatalogResult<Page<Product>> {
        let pattern = like_pattern(keyword);

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM products WHERE name ILIKE $1 OR description ILIKE $1",
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM products \
             WHERE name ILIKE $1 OR description ILIKE $1 \
             ORDER BY id ASC LIMIT $2 OFFSET $3"
        ))
        .bind(&pattern)
        .bind(i64::from(page.size))
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        let items = rows.iter().map(row_to_product).collect::<CatalogResult<_>>()?;
        Ok(Page::new(items, total as u64))
    }

    async fn by_price_range(&self, min: Decimal, max: Decimal) -> CatalogResult<Vec<Product>> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM products WHERE price BETWEEN $1 AND $2 ORDER BY id ASC"
        ))
        .bind(min)
        .bind(max)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(row_to_product).collect()
    }

    async fn by_stock_below(&self, threshold: u32) -> CatalogResult<Vec<Product>> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM products WHERE stock_quantity < $1 ORDER BY id ASC"
        ))
        .bind(i64::from(threshold))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(row_to_product).collect()
    }

    async fn count_stock_below(&self, threshold: u32) -> CatalogResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE stock_quantity < $1")
            .bind(i64::from(threshold))
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(count as u64)
    }
}
