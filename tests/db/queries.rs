use crate::common::*;
use wishlist_service::db::{self, queries::ProductScope};
use wishlist_service::models::ProductType;

#[test]
fn test_create_pool_on_disk_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wishlist.db");
    let path = path.to_str().unwrap();

    let customer_id = {
        let pool = db::create_pool(path, 2).unwrap();
        let conn = pool.get().unwrap();
        create_test_customer(&conn, "Uma").customer.id
    };

    // Reopening re-runs the schema bootstrap without touching data
    let pool = db::create_pool(path, 2).unwrap();
    let conn = pool.get().unwrap();
    assert!(queries::get_customer_by_id(&conn, &customer_id).unwrap().is_some());
}

#[test]
fn test_api_key_lookup_uses_hash() {
    let pool = db::create_memory_pool().unwrap();
    let conn = pool.get().unwrap();
    let created = create_test_customer(&conn, "Victor");

    assert_ne!(created.customer.api_key_hash, created.api_key);
    assert_eq!(created.customer.api_key_hash, queries::hash_api_key(&created.api_key));

    let found = queries::get_customer_by_api_key(&conn, &created.api_key)
        .unwrap()
        .unwrap();
    assert_eq!(found.id, created.customer.id);
    assert!(queries::get_customer_by_api_key(&conn, "wl_wrong").unwrap().is_none());
}

#[test]
fn test_duplicate_wishlist_row_is_rejected_by_schema() {
    let pool = db::create_memory_pool().unwrap();
    let conn = pool.get().unwrap();
    let customer = create_test_customer(&conn, "Wendy");
    let product = create_test_product(&conn, "Compass", ProductType::Simple);

    queries::create_wishlist_item(&conn, &customer.customer.id, TEST_CHANNEL, &product.id).unwrap();
    assert!(
        queries::create_wishlist_item(&conn, &customer.customer.id, TEST_CHANNEL, &product.id)
            .is_err()
    );
    // Same product in another channel is a separate record
    queries::create_wishlist_item(&conn, &customer.customer.id, "b2b", &product.id).unwrap();
}

#[test]
fn test_set_wishlist_shared_scopes() {
    let pool = db::create_memory_pool().unwrap();
    let conn = pool.get().unwrap();
    let customer = create_test_customer(&conn, "Xavier");
    let other = create_test_customer(&conn, "Yolanda");
    let ids: Vec<String> = ["Map", "Torch", "Rope"]
        .iter()
        .map(|name| {
            let p = create_test_product(&conn, name, ProductType::Simple);
            queries::create_wishlist_item(&conn, &customer.customer.id, TEST_CHANNEL, &p.id).unwrap();
            queries::create_wishlist_item(&conn, &other.customer.id, TEST_CHANNEL, &p.id).unwrap();
            p.id
        })
        .collect();
    let customer_id = &customer.customer.id;

    let updated = queries::set_wishlist_shared(&conn, customer_id, ProductScope::In(&ids[..2]), true).unwrap();
    assert_eq!(updated, 2);

    let updated = queries::set_wishlist_shared(&conn, customer_id, ProductScope::NotIn(&ids[..1]), false).unwrap();
    assert_eq!(updated, 2);

    let shared: Vec<_> = queries::list_wishlist_items_for_customer(&conn, customer_id)
        .unwrap()
        .into_iter()
        .filter(|item| item.shared)
        .map(|item| item.product_id)
        .collect();
    assert_eq!(shared, vec![ids[0].clone()]);

    // An empty IN list matches nothing
    assert_eq!(queries::set_wishlist_shared(&conn, customer_id, ProductScope::In(&[]), true).unwrap(), 0);

    assert_eq!(queries::set_wishlist_shared(&conn, customer_id, ProductScope::All, true).unwrap(), 3);
    assert!(!queries::customer_has_shared_items(&conn, &other.customer.id).unwrap());
}

#[test]
fn test_purge_only_touches_disabled_products_of_customer() {
    let pool = db::create_memory_pool().unwrap();
    let conn = pool.get().unwrap();
    let customer = create_test_customer(&conn, "Zed");
    let other = create_test_customer(&conn, "Amy");
    let live = create_test_product(&conn, "Live", ProductType::Simple);
    let dead = create_test_product(&conn, "Dead", ProductType::Simple);
    for c in [&customer, &other] {
        queries::create_wishlist_item(&conn, &c.customer.id, TEST_CHANNEL, &live.id).unwrap();
        queries::create_wishlist_item(&conn, &c.customer.id, TEST_CHANNEL, &dead.id).unwrap();
    }
    queries::set_product_status(&conn, &dead.id, false).unwrap();

    assert_eq!(queries::purge_inactive_wishlist_items(&conn, &customer.customer.id).unwrap(), 1);
    assert_eq!(wishlist_product_ids(&conn, &customer.customer.id), vec![live.id.clone()]);
    assert_eq!(wishlist_product_ids(&conn, &other.customer.id).len(), 2);
}

#[test]
fn test_upsert_cart_item_merges_per_channel() {
    let pool = db::create_memory_pool().unwrap();
    let conn = pool.get().unwrap();
    let customer = create_test_customer(&conn, "Bea");
    let product = create_test_product(&conn, "Candle", ProductType::Simple);
    let customer_id = &customer.customer.id;

    let first = queries::upsert_cart_item(&conn, customer_id, TEST_CHANNEL, &product.id, 1).unwrap();
    let merged = queries::upsert_cart_item(&conn, customer_id, TEST_CHANNEL, &product.id, 2).unwrap();
    assert_eq!(merged.id, first.id);
    assert_eq!(merged.quantity, 3);

    queries::upsert_cart_item(&conn, customer_id, "b2b", &product.id, 1).unwrap();
    assert_eq!(queries::list_cart_items(&conn, customer_id).unwrap().len(), 2);
}

#[test]
fn test_deleting_product_cascades_to_wishlists() {
    let pool = db::create_memory_pool().unwrap();
    let conn = pool.get().unwrap();
    let customer = create_test_customer(&conn, "Cy");
    let product = create_test_product(&conn, "Ephemeral", ProductType::Simple);
    queries::create_wishlist_item(&conn, &customer.customer.id, TEST_CHANNEL, &product.id).unwrap();

    conn.execute("DELETE FROM products WHERE id = ?1", [&product.id]).unwrap();
    assert!(wishlist_product_ids(&conn, &customer.customer.id).is_empty());
}
