pub mod customers;
pub mod dev;
pub mod public;

use axum::{Router, routing::post};
use tower_http::trace::TraceLayer;

use crate::db::AppState;

/// Assemble every route. Dev seeding endpoints are only mounted in dev mode.
pub fn app(state: AppState, dev_mode: bool) -> Router {
    let mut router = Router::new()
        .merge(public::router())
        .merge(customers::router(state.clone()));

    if dev_mode {
        router = router
            .route("/dev/customers", post(dev::create_dev_customer))
            .route("/dev/products", post(dev::create_dev_product));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
