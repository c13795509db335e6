//! Seeding endpoints, mounted only in dev mode.

use axum::extract::State;

use crate::db::{AppState, queries};
use crate::error::{AppError, Result};
use crate::extractors::Json;
use crate::models::{CreateCustomer, CreateProduct, CustomerWithApiKey, Product};

pub async fn create_dev_customer(
    State(state): State<AppState>,
    Json(input): Json<CreateCustomer>,
) -> Result<Json<CustomerWithApiKey>> {
    if input.email.trim().is_empty() {
        return Err(AppError::BadRequest("email is required".into()));
    }

    let conn = state.db.get()?;
    let created = queries::create_customer(&conn, &input)?;

    tracing::info!(
        "DEV: Created customer {} ({})",
        created.customer.id,
        created.customer.email
    );

    Ok(Json(created))
}

pub async fn create_dev_product(
    State(state): State<AppState>,
    Json(input): Json<CreateProduct>,
) -> Result<Json<Product>> {
    let conn = state.db.get()?;

    if let Some(parent_id) = input.parent_id.as_deref() {
        queries::get_product_by_id(&conn, parent_id)?
            .ok_or_else(|| AppError::NotFound("Parent product not found".into()))?;
    }

    let product = queries::create_product(&conn, &input)?;

    tracing::info!(
        "DEV: Created {} product {} ({})",
        product.product_type.as_ref(),
        product.name,
        product.id
    );

    Ok(Json(product))
}
