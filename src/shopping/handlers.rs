//! Cart and wishlist HTTP handlers
//!
//! Carts and wishlists are keyed by an opaque id chosen by the client (a
//! browser session, for instance); nothing here requires a login.

use crate::commerce::CartItem;
use crate::commerce::cart::{CartSummary, LineKey};
use crate::commerce::wishlist::WishlistToggle;
use crate::core::validation::{JsonBody, Validated};
use crate::core::{DataService, Entity, StoreError, StoreResult};
use crate::entities::product::Product;
use crate::server::host::{SharedCartService, SharedWishlistService};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// State shared by cart and wishlist handlers
#[derive(Clone)]
pub struct ShoppingAppState {
    pub carts: SharedCartService,
    pub wishlists: SharedWishlistService,
    pub products: Arc<dyn DataService<Product>>,
}

/// Body of `PATCH /carts/{cart_id}/items`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartLine {
    #[serde(flatten)]
    pub key: LineKey,
    pub quantity: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ToggleWishlist {
    pub product_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct WishlistView {
    pub products: Vec<Uuid>,
}

fn checked_id(raw: &str, what: &str) -> StoreResult<String> {
    let id = raw.trim();
    if id.is_empty() || id.len() > 128 {
        return Err(StoreError::field(what, format!("{} must be 1-128 characters", what)));
    }
    Ok(id.to_string())
}

pub async fn get_cart(
    State(state): State<ShoppingAppState>,
    Path(cart_id): Path<String>,
) -> StoreResult<Json<CartSummary>> {
    let cart_id = checked_id(&cart_id, "cartId")?;
    Ok(Json(state.carts.summary(&cart_id).await?))
}

/// `POST /carts/{cart_id}/items`: merges with an identical line
pub async fn add_cart_item(
    State(state): State<ShoppingAppState>,
    Path(cart_id): Path<String>,
    Validated(item): Validated<CartItem>,
) -> StoreResult<Json<CartSummary>> {
    let cart_id = checked_id(&cart_id, "cartId")?;
    Ok(Json(state.carts.add(&cart_id, item).await?))
}

/// `PATCH /carts/{cart_id}/items`: quantity 0 removes the line
pub async fn update_cart_item(
    State(state): State<ShoppingAppState>,
    Path(cart_id): Path<String>,
    JsonBody(line): JsonBody<UpdateCartLine>,
) -> StoreResult<Json<CartSummary>> {
    let cart_id = checked_id(&cart_id, "cartId")?;
    Ok(Json(
        state
            .carts
            .set_quantity(&cart_id, &line.key, line.quantity)
            .await?,
    ))
}

/// `DELETE /carts/{cart_id}/items?id=..&size=..&color=..`
pub async fn remove_cart_item(
    State(state): State<ShoppingAppState>,
    Path(cart_id): Path<String>,
    Query(key): Query<LineKey>,
) -> StoreResult<Json<CartSummary>> {
    let cart_id = checked_id(&cart_id, "cartId")?;
    Ok(Json(state.carts.remove(&cart_id, &key).await?))
}

pub async fn clear_cart(
    State(state): State<ShoppingAppState>,
    Path(cart_id): Path<String>,
) -> StoreResult<StatusCode> {
    let cart_id = checked_id(&cart_id, "cartId")?;
    state.carts.clear(&cart_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_wishlist(
    State(state): State<ShoppingAppState>,
    Path(wishlist_id): Path<String>,
) -> StoreResult<Json<WishlistView>> {
    let wishlist_id = checked_id(&wishlist_id, "wishlistId")?;
    let products = state.wishlists.list(&wishlist_id).await?;
    Ok(Json(WishlistView { products }))
}

/// `POST /wishlists/{wishlist_id}/toggle`
///
/// Only existing products can be added; a product already on the list can
/// always be removed, even if it has since been deleted.
pub async fn toggle_wishlist(
    State(state): State<ShoppingAppState>,
    Path(wishlist_id): Path<String>,
    JsonBody(payload): JsonBody<ToggleWishlist>,
) -> StoreResult<Json<WishlistToggle>> {
    let wishlist_id = checked_id(&wishlist_id, "wishlistId")?;

    let listed = state
        .wishlists
        .contains(&wishlist_id, &payload.product_id)
        .await?;
    if !listed && state.products.get(&payload.product_id).await?.is_none() {
        return Err(StoreError::not_found(
            Product::resource_name_singular(),
            payload.product_id,
        ));
    }

    Ok(Json(
        state
            .wishlists
            .toggle(&wishlist_id, payload.product_id)
            .await?,
    ))
}

pub async fn clear_wishlist(
    State(state): State<ShoppingAppState>,
    Path(wishlist_id): Path<String>,
) -> StoreResult<StatusCode> {
    let wishlist_id = checked_id(&wishlist_id, "wishlistId")?;
    state.wishlists.clear(&wishlist_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
