//! Service wiring: store and notifier selection at startup.

use std::sync::Arc;

use wares_analytics::{AnalyticsConfig, notifier_from_config};
use wares_catalog::{CatalogService, InMemoryProductStore, PostgresProductStore, ProductStore};

/// Shared application services, injected into handlers via `Extension`.
pub struct AppServices {
    pub catalog: CatalogService,
}

/// Build the service graph.
///
/// The store is Postgres when `DATABASE_URL` is set (the products table is
/// created on boot if missing), in-memory otherwise. The notifier is chosen
/// once from the analytics env config; handlers never branch on it again.
pub async fn build_services() -> AppServices {
    let notifier = notifier_from_config(&AnalyticsConfig::from_env());

    let store: Arc<dyn ProductStore> = match std::env::var("DATABASE_URL") {
        Ok(url) => {
            tracing::info!("using postgres product store");
            let store = PostgresProductStore::connect(&url)
                .await
                .expect("failed to connect to DATABASE_URL");
            store
                .migrate()
                .await
                .expect("failed to create products table");
            Arc::new(store)
        }
        Err(_) => {
            tracing::info!("DATABASE_URL not set; using in-memory product store");
            Arc::new(InMemoryProductStore::new())
        }
    };

    AppServices {
        catalog: CatalogService::new(store, notifier),
    }
}
