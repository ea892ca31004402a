//! Integration tests for checkout against a mock shop API.
//!
//! Each test starts an axum server on an ephemeral port that records the
//! requests it receives, then drives [`ShopApiClient`] and [`checkout_cart`]
//! against it.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use digital_shop_core::Price;
use digital_shop_integration_tests::{CATALOG_JSON, sample_items};
use digital_shop_storefront::cart::{CartStore, JsonFileStorage};
use digital_shop_storefront::catalog::find_item;
use digital_shop_storefront::checkout::{CheckoutError, checkout_cart};
use digital_shop_storefront::config::ShopConfig;
use digital_shop_storefront::shop::{ShopApiClient, ShopApiError};

/// What the mock backend saw.
#[derive(Clone, Default)]
struct MockShop {
    requests: Arc<Mutex<Vec<String>>>,
    authorization: Arc<Mutex<Vec<Option<String>>>>,
    reject_item: Option<&'static str>,
    fail_checkout: bool,
}

impl MockShop {
    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, request: String, headers: &HeaderMap) {
        self.requests.lock().unwrap().push(request);
        self.authorization.lock().unwrap().push(
            headers
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string),
        );
    }
}

async fn list_items(State(shop): State<MockShop>, headers: HeaderMap) -> Json<Value> {
    shop.record("GET items".to_string(), &headers);
    let items: Value = serde_json::from_str(CATALOG_JSON).unwrap();
    Json(json!({ "items": items }))
}

async fn add_line(
    State(shop): State<MockShop>,
    headers: HeaderMap,
    Json(line): Json<Value>,
) -> Response {
    let item_id = line["item_id"].as_str().unwrap_or_default().to_string();
    shop.record(
        format!(
            "add {item_id} x{} ({})",
            line["quantity"],
            line["item_type"].as_str().unwrap_or_default()
        ),
        &headers,
    );

    if shop.reject_item == Some(item_id.as_str()) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "Insufficient balance" })),
        )
            .into_response();
    }
    Json(json!({ "message": "Item added to cart" })).into_response()
}

async fn checkout(State(shop): State<MockShop>, headers: HeaderMap) -> Response {
    shop.record("checkout".to_string(), &headers);

    if shop.fail_checkout {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response();
    }
    Json(json!({ "message": "Checkout successful" })).into_response()
}

/// Serve `shop` on an ephemeral port and return a client configured for it.
async fn spawn(shop: MockShop) -> ShopApiClient {
    let app = Router::new()
        .route("/api/shop/items", get(list_items))
        .route("/api/shop/cart/add", post(add_line))
        .route("/api/shop/cart/checkout", post(checkout))
        .with_state(shop);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let base_url = format!("http://{addr}/api");
    let config = ShopConfig::from_lookup(|key| match key {
        "SHOP_API_URL" => Some(base_url.clone()),
        "SHOP_API_TOKEN" => Some("test-token".to_string()),
        _ => None,
    })
    .unwrap();
    ShopApiClient::new(&config.api).unwrap()
}

fn filled_cart(dir: &tempfile::TempDir) -> CartStore<JsonFileStorage> {
    let items = sample_items();
    let mut cart = CartStore::load(JsonFileStorage::new(dir.path()));
    for id in ["item_2", "item_1", "item_2"] {
        cart.add_item(find_item(&items, id).unwrap().to_cart_candidate());
    }
    cart
}

// ============================================================================
// API client
// ============================================================================

#[tokio::test]
async fn test_list_items_from_api() {
    let shop = MockShop::default();
    let client = spawn(shop.clone()).await;

    let items = client.list_items().await.unwrap();

    assert_eq!(items, sample_items());
    assert_eq!(shop.requests(), ["GET items"]);
    assert_eq!(
        *shop.authorization.lock().unwrap(),
        [Some("Bearer test-token".to_string())]
    );
}

// ============================================================================
// Checkout
// ============================================================================

#[tokio::test]
async fn test_checkout_submits_lines_then_confirms() {
    let shop = MockShop::default();
    let client = spawn(shop.clone()).await;
    let dir = tempfile::tempdir().unwrap();
    let mut cart = filled_cart(&dir);

    let receipt = checkout_cart(&mut cart, &client).await.unwrap();

    assert_eq!(
        shop.requests(),
        [
            "add item_2 x2 (shop_item)",
            "add item_1 x1 (shop_item)",
            "checkout",
        ]
    );
    assert_eq!(receipt.lines, 2);
    assert_eq!(receipt.total_items, 3);
    assert_eq!(receipt.total_price, Price::from_units(1100));

    assert!(cart.state().is_empty());
    let reopened = CartStore::load(JsonFileStorage::new(dir.path()));
    assert!(reopened.state().is_empty());
}

#[tokio::test]
async fn test_rejected_line_keeps_cart_and_skips_confirm() {
    let shop = MockShop {
        reject_item: Some("item_2"),
        ..MockShop::default()
    };
    let client = spawn(shop.clone()).await;
    let dir = tempfile::tempdir().unwrap();
    let mut cart = filled_cart(&dir);

    let err = checkout_cart(&mut cart, &client).await.unwrap_err();

    assert_eq!(shop.requests(), ["add item_2 x2 (shop_item)"]);
    assert!(matches!(
        err,
        CheckoutError::Line {
            source: ShopApiError::Api { status: 400, .. },
            ..
        }
    ));
    assert_eq!(err.user_message(), "Insufficient balance");

    let reopened = CartStore::load(JsonFileStorage::new(dir.path()));
    assert_eq!(reopened.total_items(), 3);
}

#[tokio::test]
async fn test_failed_confirmation_falls_back_to_generic_message() {
    let shop = MockShop {
        fail_checkout: true,
        ..MockShop::default()
    };
    let client = spawn(shop.clone()).await;
    let dir = tempfile::tempdir().unwrap();
    let mut cart = filled_cart(&dir);

    let err = checkout_cart(&mut cart, &client).await.unwrap_err();

    assert_eq!(shop.requests().last().map(String::as_str), Some("checkout"));
    assert!(matches!(
        err,
        CheckoutError::Confirm(ShopApiError::Api { status: 500, .. })
    ));
    assert_eq!(err.user_message(), "Checkout failed");
    assert_eq!(cart.total_items(), 3);
}

#[tokio::test]
async fn test_empty_cart_never_reaches_the_api() {
    let shop = MockShop::default();
    let client = spawn(shop.clone()).await;
    let dir = tempfile::tempdir().unwrap();
    let mut cart = CartStore::load(JsonFileStorage::new(dir.path()));

    let err = checkout_cart(&mut cart, &client).await.unwrap_err();

    assert!(matches!(err, CheckoutError::EmptyCart));
    assert!(shop.requests().is_empty());
}
