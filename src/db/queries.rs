use chrono::Utc;
use rand::RngCore;
use rusqlite::{Connection, params, params_from_iter, types::Value};
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

use super::from_row::{
    CART_ITEM_COLS, CUSTOMER_COLS, PRODUCT_COLS, WISHLIST_ITEM_COLS,
    WISHLIST_ITEM_WITH_PRODUCT_COLS, query_all, query_one,
};

fn now() -> i64 {
    Utc::now().timestamp()
}

fn gen_id() -> String {
    Uuid::new_v4().to_string()
}

/// `?{start}, ?{start+1}, ...` for an `IN (...)` list of `count` values.
fn placeholders(start: usize, count: usize) -> String {
    (start..start + count)
        .map(|n| format!("?{}", n))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Hash an API key for storage/lookup (plaintext keys are never stored).
pub fn hash_api_key(api_key: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(b"wishlist-api-key-v1:");
    hasher.update(api_key.trim().as_bytes());
    hex::encode(hasher.finalize())
}

pub fn generate_api_key() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!("wl_{}", hex::encode(bytes))
}

// ============ Customers ============

pub fn create_customer(conn: &Connection, input: &CreateCustomer) -> Result<CustomerWithApiKey> {
    let id = gen_id();
    let now = now();
    let api_key = generate_api_key();
    let api_key_hash = hash_api_key(&api_key);
    let email = input.email.trim().to_lowercase();

    conn.execute(
        "INSERT INTO customers (id, name, email, api_key_hash, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![&id, &input.name, &email, &api_key_hash, now],
    )?;

    Ok(CustomerWithApiKey {
        customer: Customer {
            id,
            name: input.name.clone(),
            email,
            api_key_hash,
            created_at: now,
        },
        api_key,
    })
}

pub fn get_customer_by_id(conn: &Connection, id: &str) -> Result<Option<Customer>> {
    query_one(
        conn,
        &format!("SELECT {} FROM customers WHERE id = ?1", CUSTOMER_COLS),
        params![id],
    )
}

pub fn get_customer_by_api_key(conn: &Connection, api_key: &str) -> Result<Option<Customer>> {
    query_one(
        conn,
        &format!("SELECT {} FROM customers WHERE api_key_hash = ?1", CUSTOMER_COLS),
        params![hash_api_key(api_key)],
    )
}

// ============ Products ============

pub fn create_product(conn: &Connection, input: &CreateProduct) -> Result<Product> {
    let id = gen_id();
    let now = now();

    conn.execute(
        "INSERT INTO products (id, sku, name, url_key, product_type, parent_id, status,
                               visible_individually, price_cents, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            &id,
            &input.sku,
            &input.name,
            &input.url_key,
            input.product_type.as_ref(),
            &input.parent_id,
            input.status,
            input.visible_individually,
            input.price_cents,
            now,
        ],
    )?;

    Ok(Product {
        id,
        sku: input.sku.clone(),
        name: input.name.clone(),
        url_key: input.url_key.clone(),
        product_type: input.product_type,
        parent_id: input.parent_id.clone(),
        status: input.status,
        visible_individually: input.visible_individually,
        price_cents: input.price_cents,
        created_at: now,
    })
}

pub fn get_product_by_id(conn: &Connection, id: &str) -> Result<Option<Product>> {
    query_one(
        conn,
        &format!("SELECT {} FROM products WHERE id = ?1", PRODUCT_COLS),
        params![id],
    )
}

/// Enable or disable a product in the catalog.
pub fn set_product_status(conn: &Connection, id: &str, status: bool) -> Result<bool> {
    let updated = conn.execute(
        "UPDATE products SET status = ?1 WHERE id = ?2",
        params![status, id],
    )?;
    Ok(updated > 0)
}

// ============ Wishlist Items ============

pub fn create_wishlist_item(
    conn: &Connection,
    customer_id: &str,
    channel_id: &str,
    product_id: &str,
) -> Result<WishlistItem> {
    let id = gen_id();
    let now = now();

    conn.execute(
        "INSERT INTO wishlist_items (id, channel_id, product_id, customer_id, shared, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, 0, ?5, ?5)",
        params![&id, channel_id, product_id, customer_id, now],
    )?;

    Ok(WishlistItem {
        id,
        channel_id: channel_id.to_string(),
        product_id: product_id.to_string(),
        customer_id: customer_id.to_string(),
        shared: false,
        created_at: now,
        updated_at: now,
    })
}

pub fn find_wishlist_item(
    conn: &Connection,
    customer_id: &str,
    channel_id: &str,
    product_id: &str,
) -> Result<Option<WishlistItem>> {
    query_one(
        conn,
        &format!(
            "SELECT {} FROM wishlist_items
             WHERE customer_id = ?1 AND channel_id = ?2 AND product_id = ?3",
            WISHLIST_ITEM_COLS
        ),
        params![customer_id, channel_id, product_id],
    )
}

pub fn get_wishlist_item_for_customer(
    conn: &Connection,
    id: &str,
    customer_id: &str,
) -> Result<Option<WishlistItem>> {
    query_one(
        conn,
        &format!(
            "SELECT {} FROM wishlist_items WHERE id = ?1 AND customer_id = ?2",
            WISHLIST_ITEM_COLS
        ),
        params![id, customer_id],
    )
}

/// Every item the customer owns, across all channels.
pub fn list_wishlist_items_for_customer(
    conn: &Connection,
    customer_id: &str,
) -> Result<Vec<WishlistItem>> {
    query_all(
        conn,
        &format!(
            "SELECT {} FROM wishlist_items WHERE customer_id = ?1 ORDER BY created_at DESC, id",
            WISHLIST_ITEM_COLS
        ),
        params![customer_id],
    )
}

pub fn list_wishlist_with_products(
    conn: &Connection,
    customer_id: &str,
    channel_id: &str,
) -> Result<Vec<WishlistItemWithProduct>> {
    query_all(
        conn,
        &format!(
            "SELECT {} FROM wishlist_items w
             JOIN products p ON p.id = w.product_id
             WHERE w.customer_id = ?1 AND w.channel_id = ?2
             ORDER BY w.created_at DESC, w.id",
            WISHLIST_ITEM_WITH_PRODUCT_COLS
        ),
        params![customer_id, channel_id],
    )
}

/// Shared items of a customer, optionally narrowed to `product_ids`.
pub fn list_shared_wishlist_with_products(
    conn: &Connection,
    customer_id: &str,
    product_ids: &[String],
) -> Result<Vec<WishlistItemWithProduct>> {
    let mut sql = format!(
        "SELECT {} FROM wishlist_items w
         JOIN products p ON p.id = w.product_id
         WHERE w.customer_id = ?1 AND w.shared = 1",
        WISHLIST_ITEM_WITH_PRODUCT_COLS
    );
    if !product_ids.is_empty() {
        sql.push_str(&format!(
            " AND w.product_id IN ({})",
            placeholders(2, product_ids.len())
        ));
    }
    sql.push_str(" ORDER BY w.created_at DESC, w.id");

    let mut values: Vec<Value> = vec![customer_id.to_string().into()];
    values.extend(product_ids.iter().map(|id| Value::from(id.clone())));
    query_all(conn, &sql, params_from_iter(values))
}

pub fn customer_has_shared_items(conn: &Connection, customer_id: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM wishlist_items WHERE customer_id = ?1 AND shared = 1",
        params![customer_id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Which of a customer's wishlist rows a bulk update applies to.
#[derive(Debug, Clone, Copy)]
pub enum ProductScope<'a> {
    All,
    In(&'a [String]),
    NotIn(&'a [String]),
}

/// Set the `shared` flag on the customer's items matching `scope`.
pub fn set_wishlist_shared(
    conn: &Connection,
    customer_id: &str,
    scope: ProductScope<'_>,
    shared: bool,
) -> Result<usize> {
    let mut sql = String::from(
        "UPDATE wishlist_items SET shared = ?1, updated_at = ?2 WHERE customer_id = ?3",
    );
    let ids: &[String] = match scope {
        ProductScope::All => &[],
        ProductScope::In(ids) if ids.is_empty() => return Ok(0),
        ProductScope::In(ids) => {
            sql.push_str(&format!(" AND product_id IN ({})", placeholders(4, ids.len())));
            ids
        }
        ProductScope::NotIn(ids) if ids.is_empty() => &[],
        ProductScope::NotIn(ids) => {
            sql.push_str(&format!(
                " AND product_id NOT IN ({})",
                placeholders(4, ids.len())
            ));
            ids
        }
    };

    let mut values: Vec<Value> = vec![
        Value::from(shared),
        Value::from(now()),
        Value::from(customer_id.to_string()),
    ];
    values.extend(ids.iter().map(|id| Value::from(id.clone())));
    Ok(conn.execute(&sql, params_from_iter(values))?)
}

pub fn delete_wishlist_item(conn: &Connection, id: &str) -> Result<bool> {
    let deleted = conn.execute("DELETE FROM wishlist_items WHERE id = ?1", params![id])?;
    Ok(deleted > 0)
}

pub fn delete_wishlist_items_for_customer(conn: &Connection, customer_id: &str) -> Result<usize> {
    Ok(conn.execute(
        "DELETE FROM wishlist_items WHERE customer_id = ?1",
        params![customer_id],
    )?)
}

/// Delete the customer's items whose product has been disabled.
pub fn purge_inactive_wishlist_items(conn: &Connection, customer_id: &str) -> Result<usize> {
    Ok(conn.execute(
        "DELETE FROM wishlist_items
         WHERE customer_id = ?1
           AND product_id IN (SELECT id FROM products WHERE status = 0)",
        params![customer_id],
    )?)
}

// ============ Cart Items ============

/// Add `quantity` of a product to the customer's cart, merging with an
/// existing line for the same channel and product.
pub fn upsert_cart_item(
    conn: &Connection,
    customer_id: &str,
    channel_id: &str,
    product_id: &str,
    quantity: i64,
) -> Result<CartItem> {
    let now = now();
    conn.execute(
        "INSERT INTO cart_items (id, customer_id, channel_id, product_id, quantity, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
         ON CONFLICT (customer_id, channel_id, product_id)
         DO UPDATE SET quantity = quantity + excluded.quantity, updated_at = excluded.updated_at",
        params![gen_id(), customer_id, channel_id, product_id, quantity, now],
    )?;

    let item = query_one(
        conn,
        &format!(
            "SELECT {} FROM cart_items
             WHERE customer_id = ?1 AND channel_id = ?2 AND product_id = ?3",
            CART_ITEM_COLS
        ),
        params![customer_id, channel_id, product_id],
    )?;
    item.ok_or_else(|| rusqlite::Error::QueryReturnedNoRows.into())
}

pub fn list_cart_items(conn: &Connection, customer_id: &str) -> Result<Vec<CartItem>> {
    query_all(
        conn,
        &format!(
            "SELECT {} FROM cart_items WHERE customer_id = ?1 ORDER BY created_at, id",
            CART_ITEM_COLS
        ),
        params![customer_id],
    )
}
