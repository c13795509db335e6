//! Cart collaborator used by "move to cart".
//!
//! The wishlist only decides *whether* an item may move; pricing, options and
//! the removal of the moved wishlist row belong to the cart implementation.

use rusqlite::Connection;
use thiserror::Error;

use crate::db::queries;
use crate::error::AppError;
use crate::models::{ProductType, WishlistItem};

#[derive(Debug, Error)]
pub enum CartError {
    #[error("Product is no longer available")]
    ProductUnavailable,

    #[error("Cart storage error: {0}")]
    Storage(String),
}

impl From<AppError> for CartError {
    fn from(err: AppError) -> Self {
        CartError::Storage(err.to_string())
    }
}

impl From<rusqlite::Error> for CartError {
    fn from(err: rusqlite::Error) -> Self {
        CartError::Storage(err.to_string())
    }
}

pub trait CartService: Send + Sync {
    /// Move a wishlist item into the owner's cart.
    ///
    /// `Ok(true)` = added to the cart and removed from the wishlist.
    /// `Ok(false)` = the product cannot be added as-is (options still need to
    /// be chosen); the wishlist item must be left alone.
    fn move_to_cart(&self, conn: &Connection, item: &WishlistItem) -> Result<bool, CartError>;
}

/// Cart stored in the service's own database.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteCart;

impl CartService for SqliteCart {
    fn move_to_cart(&self, conn: &Connection, item: &WishlistItem) -> Result<bool, CartError> {
        let product = queries::get_product_by_id(conn, &item.product_id)?
            .filter(|p| p.status)
            .ok_or(CartError::ProductUnavailable)?;

        if product.product_type == ProductType::Configurable {
            return Ok(false);
        }

        let tx = conn.unchecked_transaction()?;
        let line = queries::upsert_cart_item(&tx, &item.customer_id, &item.channel_id, &product.id, 1)?;
        queries::delete_wishlist_item(&tx, &item.id)?;
        tx.commit()?;

        tracing::debug!(
            wishlist_item = %item.id,
            cart_item = %line.id,
            quantity = line.quantity,
            "Moved wishlist item to cart"
        );

        Ok(true)
    }
}
