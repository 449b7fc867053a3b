//! PromoCode HTTP handlers

use super::model::{CreatePromoCode, PromoCode, ValidatePromoCode};
use crate::commerce::pricing::promo_discount;
use crate::commerce::{PromoCodeValidator, ValidatedPromo};
use crate::core::validation::Validated;
use crate::core::{DataService, Entity, StoreError, StoreResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// PromoCode-specific AppState
#[derive(Clone)]
pub struct PromoCodeAppState {
    pub store: Arc<dyn DataService<PromoCode>>,
    pub validator: PromoCodeValidator,
}

/// Answer of the public validation endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoCodeCheck {
    pub valid: bool,
    #[serde(flatten)]
    pub promo: ValidatedPromo,
    /// Discount the code would give on the submitted subtotal
    pub discount: f64,
}

/// `POST /promo-codes/validate`
pub async fn validate_promo_code(
    State(state): State<PromoCodeAppState>,
    Validated(payload): Validated<ValidatePromoCode>,
) -> StoreResult<Json<PromoCodeCheck>> {
    if payload.code.trim().is_empty() {
        return Err(StoreError::field("code", "code is required"));
    }

    let promo = state
        .validator
        .validate(&payload.code, payload.subtotal)
        .await?;
    let discount = promo_discount(payload.subtotal, promo.discount_percentage);

    Ok(Json(PromoCodeCheck {
        valid: true,
        promo,
        discount,
    }))
}

pub async fn list_promo_codes(
    State(state): State<PromoCodeAppState>,
) -> StoreResult<Json<Vec<PromoCode>>> {
    let mut promos = state.store.list().await?;
    promos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(Json(promos))
}

pub async fn create_promo_code(
    State(state): State<PromoCodeAppState>,
    Validated(payload): Validated<CreatePromoCode>,
) -> StoreResult<(StatusCode, Json<PromoCode>)> {
    let promo = state.store.create(payload.into_promo_code()).await?;
    tracing::info!(code = %promo.code, discount = promo.discount_percentage, "promo code created");
    Ok((StatusCode::CREATED, Json(promo)))
}

pub async fn delete_promo_code(
    State(state): State<PromoCodeAppState>,
    Path(id): Path<String>,
) -> StoreResult<StatusCode> {
    let id = Uuid::parse_str(&id)?;
    let removed = state
        .store
        .delete(&id)
        .await?
        .ok_or_else(|| StoreError::not_found(PromoCode::resource_name_singular(), id))?;
    tracing::info!(code = %removed.code, "promo code deleted");
    Ok(StatusCode::NO_CONTENT)
}
