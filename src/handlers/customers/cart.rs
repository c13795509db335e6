use axum::extract::{Extension, State};
use serde::Serialize;

use crate::db::{AppState, queries};
use crate::error::Result;
use crate::extractors::{Json, Path};
use crate::middleware::CustomerContext;
use crate::models::{ApiMessage, CartItem, MessageLevel};
use crate::wishlist::{self, MoveOutcome};

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveStatus {
    Moved,
    MissingOptions,
    Failed,
}

#[derive(Debug, Serialize)]
pub struct MoveResponse {
    pub status: MoveStatus,
    /// Product page to continue from when the item could not be moved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

pub async fn move_to_cart(
    State(state): State<AppState>,
    Extension(ctx): Extension<CustomerContext>,
    Path(item_id): Path<String>,
) -> Result<Json<ApiMessage<MoveResponse>>> {
    let conn = state.db.get()?;

    let outcome = wishlist::move_to_cart(&conn, state.cart.as_ref(), &ctx.customer.id, &item_id)?;

    let message = match outcome {
        MoveOutcome::Moved => ApiMessage::success("Item moved to cart").with_data(MoveResponse {
            status: MoveStatus::Moved,
            redirect: None,
        }),
        MoveOutcome::MissingOptions { url_key } => ApiMessage::new(
            MessageLevel::Info,
            "Please select the product options before adding it to the cart",
        )
        .with_data(MoveResponse {
            status: MoveStatus::MissingOptions,
            redirect: Some(state.product_url(&url_key)),
        }),
        MoveOutcome::Failed { url_key } => {
            ApiMessage::new(MessageLevel::Warning, "Item could not be moved to cart").with_data(
                MoveResponse {
                    status: MoveStatus::Failed,
                    redirect: Some(state.product_url(&url_key)),
                },
            )
        }
    };

    Ok(Json(message))
}

pub async fn list_cart(
    State(state): State<AppState>,
    Extension(ctx): Extension<CustomerContext>,
) -> Result<Json<Vec<CartItem>>> {
    let conn = state.db.get()?;
    let items = queries::list_cart_items(&conn, &ctx.customer.id)?;
    Ok(Json(items))
}
