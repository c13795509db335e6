use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProductType {
    Simple,
    /// Parent of option-driven variants; variants keep their own id in wishlists
    Configurable,
    Virtual,
    Grouped,
    Downloadable,
    Bundle,
    Booking,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub sku: String,
    pub name: String,
    pub url_key: String,
    pub product_type: ProductType,
    pub parent_id: Option<String>,
    /// Enabled in the catalog
    pub status: bool,
    pub visible_individually: bool,
    pub price_cents: Option<i64>,
    pub created_at: i64,
}

impl Product {
    /// Whether a customer may save this product on its own.
    pub fn is_saleable_alone(&self) -> bool {
        self.status && self.visible_individually
    }
}

/// Product fields embedded in wishlist listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: String,
    pub name: String,
    pub url_key: String,
    pub product_type: ProductType,
    pub price_cents: Option<i64>,
    pub status: bool,
}

impl From<Product> for ProductSummary {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            url_key: product.url_key,
            product_type: product.product_type,
            price_cents: product.price_cents,
            status: product.status,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateProduct {
    pub sku: String,
    pub name: String,
    pub url_key: String,
    pub product_type: ProductType,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default = "default_true")]
    pub status: bool,
    #[serde(default = "default_true")]
    pub visible_individually: bool,
    #[serde(default)]
    pub price_cents: Option<i64>,
}

fn default_true() -> bool {
    true
}
