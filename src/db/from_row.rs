//! Row mapping for every table, plus the column lists the mappers expect.
//!
//! Each `*_COLS` constant must stay in the same order as the `row.get(n)`
//! calls of its `FromRow` impl.

use std::str::FromStr;

use rusqlite::{Connection, OptionalExtension, Params, Row, types::Type};

use crate::error::Result;
use crate::models::*;

pub const CUSTOMER_COLS: &str = "id, name, email, api_key_hash, created_at";

pub const PRODUCT_COLS: &str = "id, sku, name, url_key, product_type, parent_id, status, \
     visible_individually, price_cents, created_at";

pub const WISHLIST_ITEM_COLS: &str =
    "id, channel_id, product_id, customer_id, shared, created_at, updated_at";

/// Wishlist item joined with its product (`w` = wishlist_items, `p` = products).
pub const WISHLIST_ITEM_WITH_PRODUCT_COLS: &str = "w.id, w.channel_id, w.product_id, \
     w.customer_id, w.shared, w.created_at, w.updated_at, p.name, p.url_key, p.product_type, \
     p.price_cents, p.status";

pub const CART_ITEM_COLS: &str =
    "id, customer_id, channel_id, product_id, quantity, created_at, updated_at";

pub trait FromRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}

fn parse_product_type(row: &Row, idx: usize) -> rusqlite::Result<ProductType> {
    let raw: String = row.get(idx)?;
    ProductType::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

impl FromRow for Customer {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Customer {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            api_key_hash: row.get(3)?,
            created_at: row.get(4)?,
        })
    }
}

impl FromRow for Product {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Product {
            id: row.get(0)?,
            sku: row.get(1)?,
            name: row.get(2)?,
            url_key: row.get(3)?,
            product_type: parse_product_type(row, 4)?,
            parent_id: row.get(5)?,
            status: row.get(6)?,
            visible_individually: row.get(7)?,
            price_cents: row.get(8)?,
            created_at: row.get(9)?,
        })
    }
}

impl FromRow for WishlistItem {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(WishlistItem {
            id: row.get(0)?,
            channel_id: row.get(1)?,
            product_id: row.get(2)?,
            customer_id: row.get(3)?,
            shared: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }
}

impl FromRow for WishlistItemWithProduct {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let item = WishlistItem::from_row(row)?;
        let product = ProductSummary {
            id: item.product_id.clone(),
            name: row.get(7)?,
            url_key: row.get(8)?,
            product_type: parse_product_type(row, 9)?,
            price_cents: row.get(10)?,
            status: row.get(11)?,
        };
        Ok(WishlistItemWithProduct { item, product })
    }
}

impl FromRow for CartItem {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(CartItem {
            id: row.get(0)?,
            customer_id: row.get(1)?,
            channel_id: row.get(2)?,
            product_id: row.get(3)?,
            quantity: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }
}

pub fn query_one<T: FromRow>(conn: &Connection, sql: &str, params: impl Params) -> Result<Option<T>> {
    Ok(conn.query_row(sql, params, |row| T::from_row(row)).optional()?)
}

pub fn query_all<T: FromRow>(conn: &Connection, sql: &str, params: impl Params) -> Result<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, |row| T::from_row(row))?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}
