use reqwest::StatusCode;
use serde_json::{Value, json};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        // No DATABASE_URL in the test environment, so this runs on the
        // in-memory store.
        let app = wares_api::app::build_app().await;
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn widget_body() -> Value {
    json!({
        "name": "Widget",
        "description": "A widget",
        "price": "9.99",
        "stock_quantity": 5
    })
}

async fn create_product(client: &reqwest::Client, base_url: &str, body: Value) -> Value {
    let res = client
        .post(format!("{}/api/products", base_url))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

#[tokio::test]
async fn health_endpoint_is_ok() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_then_fetch_roundtrip() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create_product(&client, &srv.base_url, widget_body()).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["name"], "Widget");
    assert_eq!(created["price"], "9.99");
    assert_eq!(created["stock_quantity"], 5);

    let res = client
        .get(format!("{}/api/products/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: Value = res.json().await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn missing_product_is_not_found() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/products/999", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .put(format!("{}/api/products/999", srv.base_url))
        .json(&widget_body())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .delete(format!("{}/api/products/999", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_id_is_bad_request() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/products/abc", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_id");
}

#[tokio::test]
async fn blank_name_is_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let mut body = widget_body();
    body["name"] = json!("   ");
    let res = client
        .post(format!("{}/api/products", srv.base_url))
        .json(&body)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn update_overwrites_and_delete_removes() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create_product(&client, &srv.base_url, widget_body()).await;
    let id = created["id"].as_i64().unwrap();

    let res = client
        .put(format!("{}/api/products/{}", srv.base_url, id))
        .json(&json!({
            "name": "Widget Pro",
            "description": null,
            "price": "12.00",
            "stock_quantity": 8
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await.unwrap();
    assert_eq!(updated["id"], id);
    assert_eq!(updated["name"], "Widget Pro");

    let res = client
        .delete(format!("{}/api/products/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/api/products/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_and_filters() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    create_product(&client, &srv.base_url, widget_body()).await;
    create_product(
        &client,
        &srv.base_url,
        json!({
            "name": "Desk Lamp",
            "description": "LED lamp",
            "price": "19.99",
            "stock_quantity": 3
        }),
    )
    .await;
    create_product(
        &client,
        &srv.base_url,
        json!({
            "name": "Gadget",
            "description": null,
            "price": "24.50",
            "stock_quantity": 15
        }),
    )
    .await;

    // Case-insensitive name search.
    let res = client
        .get(format!("{}/api/products/search?name=LAMP", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["name"], "Desk Lamp");

    // Keyword search hits the description.
    let res = client
        .get(format!(
            "{}/api/products/search/advanced?keyword=led",
            srv.base_url
        ))
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["total_count"], 1);

    // Price range bounds are inclusive.
    let res = client
        .get(format!(
            "{}/api/products/price-range?min_price=9.99&max_price=19.99",
            srv.base_url
        ))
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["items"].as_array().unwrap().len(), 2);

    // Stock threshold is strict less-than; stocks are {5, 3, 15}.
    let res = client
        .get(format!(
            "{}/api/products/low-stock/count?threshold=5",
            srv.base_url
        ))
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn paginated_listing_sorts_descending() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for name in ["A", "B", "C"] {
        create_product(
            &client,
            &srv.base_url,
            json!({
                "name": name,
                "description": null,
                "price": "1.00",
                "stock_quantity": 1
            }),
        )
        .await;
    }

    let res = client
        .get(format!(
            "{}/api/products/paginated?page=0&size=2&sort_by=id&sort_dir=DESC",
            srv.base_url
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["total_count"], 3);
    let ids: Vec<i64> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 2]);
}
