use axum::http::{Method, StatusCode};

use crate::common::*;
use wishlist_service::models::ProductType;

#[tokio::test]
async fn test_remove_own_item_returns_remaining_items() {
    let state = create_test_app_state();
    let (api_key, customer_id, item_id, kept_product) = {
        let conn = state.db.get().unwrap();
        let customer = create_test_customer(&conn, "Judy");
        let a = create_test_product(&conn, "Scarf", ProductType::Simple);
        let b = create_test_product(&conn, "Gloves", ProductType::Simple);
        let item = queries::create_wishlist_item(&conn, &customer.customer.id, TEST_CHANNEL, &a.id).unwrap();
        queries::create_wishlist_item(&conn, &customer.customer.id, TEST_CHANNEL, &b.id).unwrap();
        (customer.api_key, customer.customer.id, item.id, b.id)
    };

    let (status, json) = send(
        test_app(state.clone()),
        Method::DELETE,
        &format!("/customer/wishlist/items/{}", item_id),
        Some(&api_key),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Item removed from wishlist");

    let remaining = json["data"].as_array().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["product_id"], kept_product);

    let conn = state.db.get().unwrap();
    assert_eq!(wishlist_product_ids(&conn, &customer_id), vec![kept_product]);
}

#[tokio::test]
async fn test_remove_other_customers_item_is_refused() {
    let state = create_test_app_state();
    let (intruder_key, owner_id, item_id) = {
        let conn = state.db.get().unwrap();
        let owner = create_test_customer(&conn, "Owner");
        let intruder = create_test_customer(&conn, "Intruder");
        let product = create_test_product(&conn, "Watch", ProductType::Simple);
        let item = queries::create_wishlist_item(&conn, &owner.customer.id, TEST_CHANNEL, &product.id)
            .unwrap();
        (intruder.api_key, owner.customer.id, item.id)
    };

    let (status, json) = send(
        test_app(state.clone()),
        Method::DELETE,
        &format!("/customer/wishlist/items/{}", item_id),
        Some(&intruder_key),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "Item could not be removed from wishlist");

    let conn = state.db.get().unwrap();
    assert_eq!(wishlist_product_ids(&conn, &owner_id).len(), 1);
}

#[tokio::test]
async fn test_remove_all_deletes_every_item_across_channels() {
    let state = create_test_app_state();
    let (api_key, customer_id, other_id) = {
        let conn = state.db.get().unwrap();
        let customer = create_test_customer(&conn, "Ken");
        let other = create_test_customer(&conn, "Laura");
        for (name, channel) in [("Hat", TEST_CHANNEL), ("Belt", "b2b")] {
            let product = create_test_product(&conn, name, ProductType::Simple);
            queries::create_wishlist_item(&conn, &customer.customer.id, channel, &product.id).unwrap();
            queries::create_wishlist_item(&conn, &other.customer.id, channel, &product.id).unwrap();
        }
        (customer.api_key, customer.customer.id, other.customer.id)
    };

    let (status, json) = send(test_app(state.clone()), Method::DELETE, "/customer/wishlist", Some(&api_key), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["removed"], 2);

    let conn = state.db.get().unwrap();
    assert!(wishlist_product_ids(&conn, &customer_id).is_empty());
    assert_eq!(wishlist_product_ids(&conn, &other_id).len(), 2);
}

#[tokio::test]
async fn test_remove_all_on_empty_wishlist_succeeds() {
    let state = create_test_app_state();
    let api_key = {
        let conn = state.db.get().unwrap();
        create_test_customer(&conn, "Mallory").api_key
    };

    let (status, json) = send(test_app(state), Method::DELETE, "/customer/wishlist", Some(&api_key), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["level"], "success");
    assert_eq!(json["data"]["removed"], 0);
}
