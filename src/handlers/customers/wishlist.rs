use axum::extract::{Extension, State};
use serde::Serialize;

use crate::db::{AppState, queries};
use crate::error::{AppError, Result};
use crate::extractors::{Json, Path};
use crate::middleware::CustomerContext;
use crate::models::{ApiMessage, MessageLevel, WishlistItem, WishlistItemWithProduct};
use crate::wishlist::{self, AddOutcome};

#[derive(Debug, Serialize)]
pub struct WishlistResponse {
    pub items: Vec<WishlistItemWithProduct>,
    /// Items dropped during this request because their product was disabled
    pub removed_inactive: usize,
    pub sharing_enabled: bool,
    /// Whether any item is currently shared, in any channel. Matches what
    /// `shared_link` exposes, since shared views are not channel-scoped.
    pub shared: bool,
    pub shared_link: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RemovedCount {
    pub removed: usize,
}

pub async fn list_wishlist(
    State(state): State<AppState>,
    Extension(ctx): Extension<CustomerContext>,
) -> Result<Json<ApiMessage<WishlistResponse>>> {
    let conn = state.db.get()?;
    let customer_id = &ctx.customer.id;

    let listing = wishlist::list_for_customer(&conn, &state.wishlist, customer_id, &ctx.channel_id)?;
    let shared = queries::customer_has_shared_items(&conn, customer_id)?;
    let shared_link = state
        .wishlist
        .sharing_enabled
        .then(|| state.share_links.shared_link(customer_id, &[]));

    let message = if listing.removed_inactive > 0 {
        ApiMessage::new(
            MessageLevel::Info,
            format!(
                "{} item(s) were removed because the products are no longer available",
                listing.removed_inactive
            ),
        )
    } else {
        ApiMessage::success("Wishlist retrieved")
    };

    Ok(Json(message.with_data(WishlistResponse {
        items: listing.items,
        removed_inactive: listing.removed_inactive,
        sharing_enabled: state.wishlist.sharing_enabled,
        shared,
        shared_link,
    })))
}

pub async fn add_to_wishlist(
    State(state): State<AppState>,
    Extension(ctx): Extension<CustomerContext>,
    Path(product_id): Path<String>,
) -> Result<Json<ApiMessage<WishlistItem>>> {
    let conn = state.db.get()?;

    let outcome = wishlist::add_product(&conn, &ctx.customer.id, &ctx.channel_id, &product_id)?;

    Ok(Json(match outcome {
        AddOutcome::Added(item) => {
            tracing::info!(customer_id = %ctx.customer.id, product_id = %item.product_id, "Added to wishlist");
            ApiMessage::success("Item added to wishlist").with_data(item)
        }
        AddOutcome::Removed => {
            tracing::info!(customer_id = %ctx.customer.id, %product_id, "Removed from wishlist");
            ApiMessage::success("Item removed from wishlist")
        }
    }))
}

pub async fn remove_wishlist_item(
    State(state): State<AppState>,
    Extension(ctx): Extension<CustomerContext>,
    Path(item_id): Path<String>,
) -> Result<Json<ApiMessage<Vec<WishlistItemWithProduct>>>> {
    let conn = state.db.get()?;

    if !wishlist::remove_item(&conn, &ctx.customer.id, &item_id)? {
        return Err(AppError::NotFound(
            "Item could not be removed from wishlist".into(),
        ));
    }

    let remaining = queries::list_wishlist_with_products(&conn, &ctx.customer.id, &ctx.channel_id)?;
    Ok(Json(
        ApiMessage::success("Item removed from wishlist").with_data(remaining),
    ))
}

pub async fn remove_all_wishlist_items(
    State(state): State<AppState>,
    Extension(ctx): Extension<CustomerContext>,
) -> Result<Json<ApiMessage<RemovedCount>>> {
    let conn = state.db.get()?;
    let removed = wishlist::remove_all(&conn, &ctx.customer.id)?;

    tracing::info!(customer_id = %ctx.customer.id, removed, "Cleared wishlist");

    Ok(Json(
        ApiMessage::success("All items removed from wishlist").with_data(RemovedCount { removed }),
    ))
}
