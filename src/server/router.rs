//! Routes that are not tied to a single entity

use crate::shopping::ShoppingAppState;
use crate::shopping::handlers::{
    add_cart_item, clear_cart, clear_wishlist, get_cart, get_wishlist, remove_cart_item,
    toggle_wishlist, update_cart_item,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Build the cart and wishlist routes
///
/// - `GET|DELETE /carts/{cart_id}`
/// - `POST|PATCH|DELETE /carts/{cart_id}/items`
/// - `GET|DELETE /wishlists/{wishlist_id}`
/// - `POST /wishlists/{wishlist_id}/toggle`
pub fn build_shopping_routes(state: ShoppingAppState) -> Router {
    Router::new()
        .route("/carts/{cart_id}", get(get_cart).delete(clear_cart))
        .route(
            "/carts/{cart_id}/items",
            post(add_cart_item)
                .patch(update_cart_item)
                .delete(remove_cart_item),
        )
        .route("/wishlists/{wishlist_id}", get(get_wishlist).delete(clear_wishlist))
        .route("/wishlists/{wishlist_id}/toggle", post(toggle_wishlist))
        .with_state(state)
}
