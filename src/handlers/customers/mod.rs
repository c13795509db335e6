mod cart;
mod share;
mod wishlist;

pub use cart::*;
pub use share::*;
pub use wishlist::*;

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::db::AppState;
use crate::middleware::customer_auth;

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/customer/wishlist",
            get(list_wishlist).delete(remove_all_wishlist_items),
        )
        .route("/customer/wishlist/products/{product_id}", post(add_to_wishlist))
        .route("/customer/wishlist/share", post(share_wishlist))
        .route("/customer/wishlist/items/{item_id}", delete(remove_wishlist_item))
        .route("/customer/wishlist/items/{item_id}/move-to-cart", post(move_to_cart))
        .route("/customer/cart", get(list_cart))
        .route_layer(middleware::from_fn_with_state(state, customer_auth))
}
