use std::sync::Arc;

use axum::http::{Method, StatusCode};

use crate::common::*;
use wishlist_service::config::WishlistSettings;
use wishlist_service::models::{Product, ProductType};

/// Customer with one wishlist item for a new product of `product_type`.
fn seed(state: &AppState, product_type: ProductType) -> (String, String, String, Product) {
    let conn = state.db.get().unwrap();
    let customer = create_test_customer(&conn, "Niaj");
    let product = create_test_product(&conn, "Backpack", product_type);
    let item = queries::create_wishlist_item(&conn, &customer.customer.id, TEST_CHANNEL, &product.id)
        .unwrap();
    (customer.api_key, customer.customer.id, item.id, product)
}

async fn move_item(state: &AppState, api_key: &str, item_id: &str) -> (StatusCode, serde_json::Value) {
    send(
        test_app(state.clone()),
        Method::POST,
        &format!("/customer/wishlist/items/{}/move-to-cart", item_id),
        Some(api_key),
        None,
    )
    .await
}

#[tokio::test]
async fn test_move_simple_product_to_cart() {
    let state = create_test_app_state();
    let (api_key, customer_id, item_id, product) = seed(&state, ProductType::Simple);

    let (status, json) = move_item(&state, &api_key, &item_id).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["level"], "success");
    assert_eq!(json["data"]["status"], "moved");
    assert!(json["data"].get("redirect").is_none());

    let conn = state.db.get().unwrap();
    assert!(wishlist_product_ids(&conn, &customer_id).is_empty());
    let cart = queries::list_cart_items(&conn, &customer_id).unwrap();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0].product_id, product.id);
    assert_eq!(cart[0].quantity, 1);
    assert_eq!(cart[0].channel_id, TEST_CHANNEL);
}

#[tokio::test]
async fn test_moving_same_product_again_merges_quantity() {
    let state = create_test_app_state();
    let (api_key, customer_id, item_id, product) = seed(&state, ProductType::Simple);

    move_item(&state, &api_key, &item_id).await;
    let second_item = {
        let conn = state.db.get().unwrap();
        queries::create_wishlist_item(&conn, &customer_id, TEST_CHANNEL, &product.id)
            .unwrap()
            .id
    };
    let (_, json) = move_item(&state, &api_key, &second_item).await;
    assert_eq!(json["data"]["status"], "moved");

    let conn = state.db.get().unwrap();
    let cart = queries::list_cart_items(&conn, &customer_id).unwrap();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0].quantity, 2);
}

#[tokio::test]
async fn test_configurable_product_reports_missing_options() {
    let state = create_test_app_state();
    let (api_key, customer_id, item_id, product) = seed(&state, ProductType::Configurable);

    let (status, json) = move_item(&state, &api_key, &item_id).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["level"], "info");
    assert_eq!(json["data"]["status"], "missing_options");
    assert_eq!(
        json["data"]["redirect"],
        format!("{}/{}", TEST_BASE_URL, product.url_key)
    );

    let conn = state.db.get().unwrap();
    assert_eq!(wishlist_product_ids(&conn, &customer_id), vec![product.id]);
    assert!(queries::list_cart_items(&conn, &customer_id).unwrap().is_empty());
}

#[tokio::test]
async fn test_cart_failure_is_downgraded_to_warning() {
    let state = create_test_app_state_with(WishlistSettings::default(), Arc::new(FailingCart));
    let (api_key, customer_id, item_id, product) = seed(&state, ProductType::Simple);

    let (status, json) = move_item(&state, &api_key, &item_id).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["level"], "warning");
    assert_eq!(json["message"], "Item could not be moved to cart");
    assert_eq!(json["data"]["status"], "failed");
    assert_eq!(
        json["data"]["redirect"],
        format!("{}/{}", TEST_BASE_URL, product.url_key)
    );

    let conn = state.db.get().unwrap();
    assert_eq!(wishlist_product_ids(&conn, &customer_id), vec![product.id]);
}

#[tokio::test]
async fn test_disabled_product_cannot_be_moved() {
    let state = create_test_app_state();
    let (api_key, customer_id, item_id, product) = seed(&state, ProductType::Simple);
    {
        let conn = state.db.get().unwrap();
        queries::set_product_status(&conn, &product.id, false).unwrap();
    }

    let (status, json) = move_item(&state, &api_key, &item_id).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "failed");

    let conn = state.db.get().unwrap();
    assert_eq!(wishlist_product_ids(&conn, &customer_id), vec![product.id]);
}

#[tokio::test]
async fn test_move_other_customers_item_is_not_found() {
    let state = create_test_app_state();
    let (_, owner_id, item_id, _) = seed(&state, ProductType::Simple);
    let intruder_key = {
        let conn = state.db.get().unwrap();
        create_test_customer(&conn, "Oscar").api_key
    };

    let (status, _) = move_item(&state, &intruder_key, &item_id).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let conn = state.db.get().unwrap();
    assert_eq!(wishlist_product_ids(&conn, &owner_id).len(), 1);
    assert!(queries::list_cart_items(&conn, &owner_id).unwrap().is_empty());
}
