//! Customer wishlists for a multi-channel storefront: saving products,
//! sharing them through signed links, and moving them into the cart.

pub mod cart;
pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod signing;
pub mod util;
pub mod wishlist;
