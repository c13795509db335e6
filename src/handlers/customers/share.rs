use axum::extract::{Extension, State};

use crate::db::AppState;
use crate::error::Result;
use crate::extractors::Json;
use crate::middleware::CustomerContext;
use crate::models::{ApiMessage, ShareWishlist};
use crate::wishlist::{self, ShareOutcome};

pub async fn share_wishlist(
    State(state): State<AppState>,
    Extension(ctx): Extension<CustomerContext>,
    Json(input): Json<ShareWishlist>,
) -> Result<Json<ApiMessage<ShareOutcome>>> {
    let conn = state.db.get()?;

    let outcome = wishlist::share(
        &conn,
        &state.wishlist,
        &state.share_links,
        &ctx.customer.id,
        &input,
    )?;

    Ok(Json(
        ApiMessage::success("Wishlist sharing updated").with_data(outcome),
    ))
}
