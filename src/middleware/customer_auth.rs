use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::db::{AppState, queries};
use crate::models::Customer;
use crate::util::extract_bearer_token;

pub const CHANNEL_HEADER: &str = "x-channel";

/// Authenticated customer and the storefront channel the request targets.
#[derive(Clone)]
pub struct CustomerContext {
    pub customer: Customer,
    pub channel_id: String,
}

fn resolve_channel(headers: &HeaderMap, default_channel: &str) -> String {
    headers
        .get(CHANNEL_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(default_channel)
        .to_string()
}

pub async fn customer_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let api_key = extract_bearer_token(request.headers()).ok_or(StatusCode::UNAUTHORIZED)?;

    // Scoped so the connection is back in the pool before the handler runs
    let customer = {
        let conn = state.db.get().map_err(|e| {
            tracing::error!("DB connection error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        queries::get_customer_by_api_key(&conn, api_key)
            .map_err(|e| {
                tracing::error!("DB error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            })?
            .ok_or(StatusCode::UNAUTHORIZED)?
    };

    let channel_id = resolve_channel(request.headers(), &state.default_channel);

    request
        .extensions_mut()
        .insert(CustomerContext { customer, channel_id });

    Ok(next.run(request).await)
}
