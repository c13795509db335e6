mod customer_auth;

pub use customer_auth::*;
