use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use wares_core::{PageRequest, ProductId, SortDirection, SortField};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/paginated", get(list_products_paginated))
        .route("/search", get(search_products_by_name))
        .route("/search/advanced", get(search_products))
        .route("/price-range", get(products_by_price_range))
        .route("/low-stock", get(low_stock_products))
        .route("/low-stock/count", get(count_low_stock_products))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

fn parse_id(id: &str) -> Result<ProductId, axum::response::Response> {
    id.parse().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id")
    })
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.catalog.list_all().await {
        Ok(products) => {
            let items = products.iter().map(dto::product_to_json).collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn list_products_paginated(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::PaginatedParams>,
) -> axum::response::Response {
    let page = PageRequest::new(params.page, params.size);
    let field = SortField::parse_or_default(&params.sort_by);
    let direction = SortDirection::parse_or_default(&params.sort_dir);

    match services.catalog.list_page(page, field, direction).await {
        Ok(result) => (
            StatusCode::OK,
            Json(dto::page_to_json(&result, params.page, params.size)),
        )
            .into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.catalog.get(id).await {
        Ok(Some(product)) => (StatusCode::OK, Json(dto::product_to_json(&product))).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::ProductRequest>,
) -> axum::response::Response {
    match services.catalog.create(body.into_new_product()).await {
        Ok(product) => {
            (StatusCode::CREATED, Json(dto::product_to_json(&product))).into_response()
        }
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::ProductRequest>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.catalog.update(id, body.into_new_product()).await {
        Ok(product) => (StatusCode::OK, Json(dto::product_to_json(&product))).into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.catalog.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn search_products_by_name(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::NameSearchParams>,
) -> axum::response::Response {
    match services.catalog.search_by_name(&params.name).await {
        Ok(products) => {
            let items = products.iter().map(dto::product_to_json).collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn search_products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::KeywordSearchParams>,
) -> axum::response::Response {
    let page = params.page_request();
    match services.catalog.search_keyword(&params.keyword, page).await {
        Ok(result) => (
            StatusCode::OK,
            Json(dto::page_to_json(&result, params.page, params.size)),
        )
            .into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn products_by_price_range(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::PriceRangeParams>,
) -> axum::response::Response {
    match services
        .catalog
        .by_price_range(params.min_price, params.max_price)
        .await
    {
        Ok(products) => {
            let items = products.iter().map(dto::product_to_json).collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn low_stock_products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::ThresholdParams>,
) -> axum::response::Response {
    match services.catalog.by_stock_below(params.threshold).await {
        Ok(products) => {
            let items = products.iter().map(dto::product_to_json).collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn count_low_stock_products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::ThresholdParams>,
) -> axum::response::Response {
    match services.catalog.count_stock_below(params.threshold).await {
        Ok(count) => (StatusCode::OK, Json(serde_json::json!({ "count": count }))).into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}
