mod cart;
mod customer;
mod product;
mod response;
mod wishlist;

pub use cart::*;
pub use customer::*;
pub use product::*;
pub use response::*;
pub use wishlist::*;
