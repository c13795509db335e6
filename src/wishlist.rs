//! Wishlist operations.
//!
//! Handlers resolve the customer and channel, then call into here with a
//! single pooled connection. Feature switches are checked here so every
//! entry point enforces them the same way.

use rusqlite::Connection;
use serde::Serialize;

use crate::cart::CartService;
use crate::config::WishlistSettings;
use crate::db::queries::{self, ProductScope};
use crate::error::{AppError, Result};
use crate::models::{ProductType, ShareWishlist, WishlistItem, WishlistItemWithProduct};
use crate::signing::ShareLinkSigner;

#[derive(Debug)]
pub enum AddOutcome {
    Added(WishlistItem),
    Removed,
}

/// Channel-scoped wishlist plus the number of items dropped because their
/// product was disabled since they were saved.
#[derive(Debug)]
pub struct CustomerWishlist {
    pub items: Vec<WishlistItemWithProduct>,
    pub removed_inactive: usize,
}

#[derive(Debug, Serialize)]
pub struct ShareOutcome {
    pub shared: bool,
    pub shared_link: String,
}

#[derive(Debug)]
pub enum MoveOutcome {
    Moved,
    /// The product needs options picked on its page first
    MissingOptions { url_key: String },
    /// The cart rejected the item; details were logged
    Failed { url_key: String },
}

fn not_found() -> AppError {
    AppError::NotFound("Not found".into())
}

/// Toggle a product on the customer's wishlist for `channel_id`.
///
/// Variants of non-configurable parents are saved against the parent.
pub fn add_product(
    conn: &Connection,
    customer_id: &str,
    channel_id: &str,
    product_id: &str,
) -> Result<AddOutcome> {
    let product = queries::get_product_by_id(conn, product_id)?
        .ok_or_else(|| AppError::NotFound("Product not found".into()))?;

    if !product.is_saleable_alone() {
        return Err(AppError::Unavailable(
            "Product is not available for the wishlist".into(),
        ));
    }

    let mut target_id = product.id;
    if let Some(parent_id) = product.parent_id.as_deref() {
        let parent = queries::get_product_by_id(conn, parent_id)?
            .ok_or_else(|| AppError::NotFound("Product not found".into()))?;
        if parent.product_type != ProductType::Configurable {
            target_id = parent.id;
        }
    }

    match queries::find_wishlist_item(conn, customer_id, channel_id, &target_id)? {
        Some(existing) => {
            queries::delete_wishlist_item(conn, &existing.id)?;
            Ok(AddOutcome::Removed)
        }
        None => {
            let item = queries::create_wishlist_item(conn, customer_id, channel_id, &target_id)?;
            Ok(AddOutcome::Added(item))
        }
    }
}

pub fn list_for_customer(
    conn: &Connection,
    settings: &WishlistSettings,
    customer_id: &str,
    channel_id: &str,
) -> Result<CustomerWishlist> {
    if !settings.enabled {
        return Err(not_found());
    }

    let removed_inactive = queries::purge_inactive_wishlist_items(conn, customer_id)?;
    if removed_inactive > 0 {
        tracing::info!(
            customer_id,
            removed = removed_inactive,
            "Purged wishlist items for disabled products"
        );
    }

    let items = queries::list_wishlist_with_products(conn, customer_id, channel_id)?;
    Ok(CustomerWishlist {
        items,
        removed_inactive,
    })
}

/// Update which items are publicly shared and mint a link for them.
pub fn share(
    conn: &Connection,
    settings: &WishlistSettings,
    signer: &ShareLinkSigner,
    customer_id: &str,
    input: &ShareWishlist,
) -> Result<ShareOutcome> {
    if !settings.sharing_enabled {
        return Err(AppError::BadRequest("Wishlist sharing is disabled".into()));
    }

    let selected_all = input.selected_all();
    let ids = input.product_ids.as_slice();

    if !ids.is_empty() && input.shared && !selected_all {
        queries::set_wishlist_shared(conn, customer_id, ProductScope::In(ids), true)?;
    }

    // A partial selection narrows visibility to exactly that selection
    if !selected_all {
        queries::set_wishlist_shared(conn, customer_id, ProductScope::NotIn(ids), false)?;
    }

    if selected_all && (!ids.is_empty() || input.shared) {
        queries::set_wishlist_shared(conn, customer_id, ProductScope::All, true)?;
    }

    Ok(ShareOutcome {
        shared: input.shared,
        shared_link: signer.shared_link(customer_id, ids),
    })
}

/// Shared items reachable through a signed link. Every failure is the same
/// not-found so a link holder learns nothing about why it stopped working.
pub fn view_shared(
    conn: &Connection,
    settings: &WishlistSettings,
    signer: &ShareLinkSigner,
    raw_query: &str,
) -> Result<(String, Vec<WishlistItemWithProduct>)> {
    if !settings.sharing_enabled || !settings.enabled {
        return Err(not_found());
    }

    let params = signer.verify(raw_query).ok_or_else(not_found)?;
    let customer = queries::get_customer_by_id(conn, &params.customer_id)?.ok_or_else(not_found)?;

    let items = queries::list_shared_wishlist_with_products(conn, &customer.id, &params.product_ids)?;
    if items.is_empty() {
        return Err(not_found());
    }

    Ok((customer.name, items))
}

/// Remove one of the customer's items. Returns false, changing nothing,
/// when `item_id` is not among them.
pub fn remove_item(conn: &Connection, customer_id: &str, item_id: &str) -> Result<bool> {
    let owned = queries::list_wishlist_items_for_customer(conn, customer_id)?;
    if !owned.iter().any(|item| item.id == item_id) {
        return Ok(false);
    }
    queries::delete_wishlist_item(conn, item_id)
}

pub fn remove_all(conn: &Connection, customer_id: &str) -> Result<usize> {
    queries::delete_wishlist_items_for_customer(conn, customer_id)
}

pub fn move_to_cart(
    conn: &Connection,
    cart: &dyn CartService,
    customer_id: &str,
    item_id: &str,
) -> Result<MoveOutcome> {
    let item = queries::get_wishlist_item_for_customer(conn, item_id, customer_id)?
        .ok_or_else(|| AppError::NotFound("Wishlist item not found".into()))?;

    let url_key = queries::get_product_by_id(conn, &item.product_id)?
        .map(|p| p.url_key)
        .unwrap_or_default();

    match cart.move_to_cart(conn, &item) {
        Ok(true) => Ok(MoveOutcome::Moved),
        Ok(false) => Ok(MoveOutcome::MissingOptions { url_key }),
        Err(e) => {
            tracing::error!(
                error = %e,
                wishlist_item = %item.id,
                product_id = %item.product_id,
                "Failed to move wishlist item to cart"
            );
            Ok(MoveOutcome::Failed { url_key })
        }
    }
}
