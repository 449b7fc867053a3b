//! Storefront business logic
//!
//! Order totals, promo codes and the order lifecycle live here, independent
//! of HTTP. Handlers under `entities` call into these services.

pub mod cart;
pub mod order_id;
pub mod orders;
pub mod pricing;
pub mod promo;
pub mod stats;
pub mod wishlist;
pub mod workflow;

pub use cart::{CartItem, CartService, CartStorage, InMemoryCartStorage};
pub use orders::OrderService;
pub use promo::{PromoCodeValidator, ValidatedPromo};
pub use stats::DashboardStats;
pub use wishlist::{InMemoryWishlistStorage, WishlistService, WishlistStorage};
pub use workflow::OrderStatus;
