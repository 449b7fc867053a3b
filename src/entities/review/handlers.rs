//! Review HTTP handlers

use super::model::{CreateReview, RatingSummary, Review, ReviewQuery};
use crate::core::validation::Validated;
use crate::core::{DataService, Entity, PageRequest, PaginatedResponse, StoreError, StoreResult};
use crate::entities::product::Product;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// Review-specific AppState
#[derive(Clone)]
pub struct ReviewAppState {
    pub store: Arc<dyn DataService<Review>>,
    pub products: Arc<dyn DataService<Product>>,
}

impl ReviewAppState {
    /// Reviews hang off active products only
    async fn active_product(&self, id: &Uuid) -> StoreResult<Product> {
        self.products
            .get(id)
            .await?
            .filter(|p| p.is_active)
            .ok_or_else(|| StoreError::not_found(Product::resource_name_singular(), id))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductReviews {
    pub data: Vec<Review>,
    #[serde(flatten)]
    pub summary: RatingSummary,
}

/// `GET /products/{id}/reviews`: approved reviews, newest first
pub async fn list_product_reviews(
    State(state): State<ReviewAppState>,
    Path(id): Path<String>,
) -> StoreResult<Json<ProductReviews>> {
    let id = Uuid::parse_str(&id)?;
    let product = state.active_product(&id).await?;

    let mut reviews: Vec<Review> = state
        .store
        .search("product", &product.id.to_string())
        .await?
        .into_iter()
        .filter(|r| r.is_approved)
        .collect();
    reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let summary = RatingSummary::of(&reviews);
    Ok(Json(ProductReviews {
        data: reviews,
        summary,
    }))
}

/// `POST /products/{id}/reviews`
pub async fn create_review(
    State(state): State<ReviewAppState>,
    Path(id): Path<String>,
    Validated(payload): Validated<CreateReview>,
) -> StoreResult<(StatusCode, Json<Review>)> {
    let id = Uuid::parse_str(&id)?;
    let product = state.active_product(&id).await?;

    let review = state.store.create(payload.into_review(product.id)).await?;
    tracing::info!(product_id = %product.id, rating = review.rating, "review posted");
    Ok((StatusCode::CREATED, Json(review)))
}

/// `GET /admin/reviews`: every review, approved or not
pub async fn list_reviews(
    State(state): State<ReviewAppState>,
    Query(query): Query<ReviewQuery>,
) -> StoreResult<Json<PaginatedResponse<Review>>> {
    let mut reviews = match query.product {
        Some(product) => state.store.search("product", &product.to_string()).await?,
        None => state.store.list().await?,
    };
    reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(Json(PageRequest::new(query.page, query.limit).paginate(reviews)))
}

pub async fn delete_review(
    State(state): State<ReviewAppState>,
    Path(id): Path<String>,
) -> StoreResult<StatusCode> {
    let id = Uuid::parse_str(&id)?;
    state
        .store
        .delete(&id)
        .await?
        .ok_or_else(|| StoreError::not_found(Review::resource_name_singular(), id))?;
    tracing::info!(review_id = %id, "review deleted");
    Ok(StatusCode::NO_CONTENT)
}
