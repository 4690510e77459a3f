//! Catalog domain: the `Product` entity, its persistence layer, and the
//! service that orchestrates store calls with analytics notifications.

pub mod product;
pub mod service;
pub mod store;

pub use product::{NewProduct, Product};
pub use service::CatalogService;
pub use store::{InMemoryProductStore, PostgresProductStore, ProductStore};
