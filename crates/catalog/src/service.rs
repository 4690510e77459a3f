//! Catalog service: orchestrates store calls and analytics notifications.

use std::sync::Arc;

use rust_decimal::Decimal;

use wares_analytics::{AnalyticsEvent, AnalyticsNotifier};
use wares_core::{CatalogError, CatalogResult, Page, PageRequest, ProductId, SortDirection, SortField};

use crate::product::{NewProduct, Product};
use crate::store::ProductStore;

/// Orchestration layer over a product store and an analytics notifier.
///
/// Fires exactly one analytics event per successful operation. The notifier
/// is fail-open, so a sink problem can never fail or roll back the store
/// call; conversely a failed store call (`NotFound`) emits nothing.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn ProductStore>,
    notifier: Arc<dyn AnalyticsNotifier>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn ProductStore>, notifier: Arc<dyn AnalyticsNotifier>) -> Self {
        Self { store, notifier }
    }

    pub async fn list_all(&self) -> CatalogResult<Vec<Product>> {
        tracing::debug!("fetching all products");
        let products = self.store.list_all().await?;
        self.notifier.emit(AnalyticsEvent::product_list_view(
            products.len() as u64,
            "all_products",
        ));
        Ok(products)
    }

    pub async fn list_page(
        &self,
        page: PageRequest,
        field: SortField,
        direction: SortDirection,
    ) -> CatalogResult<Page<Product>> {
        tracing::debug!(page.index, page.size, "fetching paginated products");
        let result = self.store.list_page(page, field, direction).await?;
        self.notifier.emit(AnalyticsEvent::product_list_view(
            result.total,
            "paginated_products",
        ));
        Ok(result)
    }

    /// Fires a view event only when the product exists.
    pub async fn get(&self, id: ProductId) -> CatalogResult<Option<Product>> {
        tracing::debug!(%id, "fetching product");
        let product = self.store.get(id).await?;
        if let Some(product) = &product {
            self.notifier
                .emit(AnalyticsEvent::product_view(product.id, &product.name));
        }
        Ok(product)
    }

    pub async fn create(&self, new: NewProduct) -> CatalogResult<Product> {
        new.validate()?;
        tracing::debug!(name = %new.name, "creating product");
        let product = self.store.create(new).await?;
        self.notifier
            .emit(AnalyticsEvent::product_create(product.id, &product.name));
        Ok(product)
    }

    /// `NotFound` from the store propagates unchanged; no event is fired then.
    pub async fn update(&self, id: ProductId, fields: NewProduct) -> CatalogResult<Product> {
        fields.validate()?;
        tracing::debug!(%id, "updating product");
        let product = self.store.update(id, fields).await?;
        self.notifier
            .emit(AnalyticsEvent::product_update(product.id, &product.name));
        Ok(product)
    }

    /// Reads the record first (the delete event carries the product name),
    /// then deletes. `NotFound` propagates unchanged with no event.
    pub async fn delete(&self, id: ProductId) -> CatalogResult<()> {
        tracing::debug!(%id, "deleting product");
        let existing = self.store.get(id).await?.ok_or(CatalogError::NotFound)?;
        self.store.delete(id).await?;
        self.notifier
            .emit(AnalyticsEvent::product_delete(id, &existing.name));
        Ok(())
    }

    pub async fn search_by_name(&self, name: &str) -> CatalogResult<Vec<Product>> {
        tracing::debug!(name, "searching products by name");
        let products = self.store.search_by_name(name).await?;
        self.notifier
            .emit(AnalyticsEvent::product_search(name, products.len() as u64));
        Ok(products)
    }

    pub async fn search_keyword(
        &self,
        keyword: &str,
        page: PageRequest,
    ) -> CatalogResult<Page<Product>> {
        tracing::debug!(keyword, "searching products by keyword");
        let result = self.store.search_keyword(keyword, page).await?;
        self.notifier
            .emit(AnalyticsEvent::product_search(keyword, result.total));
        Ok(result)
    }

    /// No analytics event for price-range reads.
    pub async fn by_price_range(&self, min: Decimal, max: Decimal) -> CatalogResult<Vec<Product>> {
        tracing::debug!(%min, %max, "fetching products by price range");
        self.store.by_price_range(min, max).await
    }

    /// No analytics event for stock reads.
    pub async fn by_stock_below(&self, threshold: u32) -> CatalogResult<Vec<Product>> {
        tracing::debug!(threshold, "fetching low stock products");
        self.store.by_stock_below(threshold).await
    }

    pub async fn count_stock_below(&self, threshold: u32) -> CatalogResult<u64> {
        tracing::debug!(threshold, "counting low stock products");
        self.store.count_stock_below(threshold).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use rust_decimal_macros::dec;

    use crate::store::InMemoryProductStore;

    /// Test notifier that records every emitted event.
    #[derive(Debug, Default)]
    struct RecordingNotifier {
        events: Mutex<Vec<AnalyticsEvent>>,
    }

    impl RecordingNotifier {
        fn events(&self) -> Vec<AnalyticsEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl AnalyticsNotifier for RecordingNotifier {
        fn emit(&self, event: AnalyticsEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    fn service() -> (CatalogService, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        let service = CatalogService::new(
            Arc::new(InMemoryProductStore::new()),
            notifier.clone(),
        );
        (service, notifier)
    }

    fn widget() -> NewProduct {
        NewProduct {
            name: "Widget".to_string(),
            description: None,
            price: dec!(9.99),
            stock_quantity: 5,
        }
    }

    #[tokio::test]
    async fn create_then_get_fires_create_and_view_events() {
        let (service, notifier) = service();

        let created = service.create(widget()).await.unwrap();
        assert_eq!(created.id, ProductId::new(1));

        let fetched = service.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);

        let events = notifier.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name, "product_create");
        assert_eq!(events[1].name, "product_view");
        assert_eq!(events[1].params["product_id"], 1);
    }

    #[tokio::test]
    async fn get_missing_fires_no_event() {
        let (service, notifier) = service();

        let result = service.get(ProductId::new(42)).await.unwrap();
        assert!(result.is_none());
        assert!(notifier.events().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_invalid_input_without_event() {
        let (service, notifier) = service();

        let mut bad = widget();
        bad.name = "  ".to_string();
        let err = service.create(bad).await.unwrap_err();

        assert!(matches!(err, CatalogError::Validation(_)));
        assert!(notifier.events().is_empty());
    }

    #[tokio::test]
    async fn update_missing_propagates_not_found_without_event() {
        let (service, notifier) = service();

        let err = service.update(ProductId::new(9), widget()).await.unwrap_err();
        assert_eq!(err, CatalogError::NotFound);
        assert!(notifier.events().is_empty());
    }

    #[tokio::test]
    async fn update_fires_update_event_with_new_name() {
        let (service, notifier) = service();
        let created = service.create(widget()).await.unwrap();

        let mut fields = widget();
        fields.name = "Widget Pro".to_string();
        service.update(created.id, fields).await.unwrap();

        let events = notifier.events();
        assert_eq!(events.last().unwrap().name, "product_update");
        assert_eq!(events.last().unwrap().params["product_name"], "Widget Pro");
    }

    #[tokio::test]
    async fn delete_fires_delete_event_and_removes_record() {
        let (service, notifier) = service();
        let created = service.create(widget()).await.unwrap();

        service.delete(created.id).await.unwrap();
        assert!(service.get(created.id).await.unwrap().is_none());

        let events = notifier.events();
        assert_eq!(events.last().unwrap().name, "product_delete");
        assert_eq!(events.last().unwrap().params["product_name"], "Widget");
    }

    #[tokio::test]
    async fn delete_missing_propagates_not_found_without_event() {
        let (service, notifier) = service();

        let err = service.delete(ProductId::new(9)).await.unwrap_err();
        assert_eq!(err, CatalogError::NotFound);
        assert!(notifier.events().is_empty());
    }

    #[tokio::test]
    async fn searches_fire_search_events_with_counts() {
        let (service, notifier) = service();
        service.create(widget()).await.unwrap();

        service.search_by_name("wid").await.unwrap();
        service
            .search_keyword("nothing-matches", PageRequest::default())
            .await
            .unwrap();

        let events = notifier.events();
        let search_events: Vec<_> = events.iter().filter(|e| e.name == "product_search").collect();
        assert_eq!(search_events.len(), 2);
        assert_eq!(search_events[0].params["results_count"], 1);
        assert_eq!(search_events[1].params["results_count"], 0);
    }

    #[tokio::test]
    async fn list_operations_fire_list_view_events() {
        let (service, notifier) = service();
        service.create(widget()).await.unwrap();

        service.list_all().await.unwrap();
        service
            .list_page(PageRequest::default(), SortField::Id, SortDirection::Asc)
            .await
            .unwrap();

        let events = notifier.events();
        let list_events: Vec<_> = events
            .iter()
            .filter(|e| e.name == "product_list_view")
            .collect();
        assert_eq!(list_events.len(), 2);
        assert_eq!(list_events[0].params["list_type"], "all_products");
        assert_eq!(list_events[1].params["list_type"], "paginated_products");
    }

    #[tokio::test]
    async fn filter_reads_fire_no_events() {
        let (service, notifier) = service();
        service.create(widget()).await.unwrap();
        notifier.events.lock().unwrap().clear();

        service.by_price_range(dec!(0), dec!(100)).await.unwrap();
        service.by_stock_below(10).await.unwrap();
        assert_eq!(service.count_stock_below(10).await.unwrap(), 1);

        assert!(notifier.events().is_empty());
    }
}
