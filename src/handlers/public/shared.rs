use axum::extract::{RawQuery, State};
use serde::Serialize;

use crate::db::AppState;
use crate::error::Result;
use crate::extractors::Json;
use crate::models::{ApiMessage, WishlistItemWithProduct};
use crate::wishlist;

#[derive(Debug, Serialize)]
pub struct SharedWishlistResponse {
    pub customer_name: String,
    pub items: Vec<WishlistItemWithProduct>,
}

/// Public view of a customer's shared items, reached through a signed link.
pub async fn view_shared_wishlist(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<ApiMessage<SharedWishlistResponse>>> {
    let conn = state.db.get()?;

    let (customer_name, items) = wishlist::view_shared(
        &conn,
        &state.wishlist,
        &state.share_links,
        query.as_deref().unwrap_or_default(),
    )?;

    Ok(Json(
        ApiMessage::success(format!("{}'s wishlist", customer_name)).with_data(
            SharedWishlistResponse {
                customer_name,
                items,
            },
        ),
    ))
}
