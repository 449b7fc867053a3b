//! Cart and wishlist endpoints
//!
//! Not documents of their own: these routes sit on top of the cart and
//! wishlist services in `commerce`, whose storage is injected by the host.

pub mod handlers;

pub use handlers::ShoppingAppState;
