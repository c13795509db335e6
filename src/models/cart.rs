use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub customer_id: String,
    pub channel_id: String,
    pub product_id: String,
    pub quantity: i64,
    pub created_at: i64,
    pub updated_at: i64,
}
