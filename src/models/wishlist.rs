use serde::{Deserialize, Serialize};

use super::ProductSummary;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistItem {
    pub id: String,
    pub channel_id: String,
    pub product_id: String,
    pub customer_id: String,
    pub shared: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WishlistItemWithProduct {
    #[serde(flatten)]
    pub item: WishlistItem,
    pub product: ProductSummary,
}

#[derive(Debug, Deserialize)]
pub struct ShareWishlist {
    #[serde(default)]
    pub product_ids: Vec<String>,
    /// Number of items the customer was looking at when selecting
    #[serde(default)]
    pub product_count: usize,
    pub shared: bool,
    /// Overrides the `product_ids.len() == product_count` inference
    #[serde(default)]
    pub select_all: Option<bool>,
}

impl ShareWishlist {
    pub fn selected_all(&self) -> bool {
        self.select_all
            .unwrap_or(self.product_ids.len() == self.product_count)
    }
}
