//! SiteStatus HTTP handlers

use super::model::{SiteStatus, UpdateSiteStatus};
use crate::core::validation::{JsonBody, filters};
use crate::core::{DataService, Entity, StoreResult};
use axum::{extract::State, response::Json};
use std::sync::Arc;

/// SiteStatus-specific AppState
#[derive(Clone)]
pub struct SiteStatusAppState {
    pub store: Arc<dyn DataService<SiteStatus>>,
}

/// `GET /site-status`; live until an admin says otherwise
pub async fn get_site_status(
    State(state): State<SiteStatusAppState>,
) -> StoreResult<Json<SiteStatus>> {
    let status = state
        .store
        .get(&SiteStatus::SINGLETON_ID)
        .await?
        .unwrap_or_default();
    Ok(Json(status))
}

/// `PUT /admin/site-status`
pub async fn put_site_status(
    State(state): State<SiteStatusAppState>,
    JsonBody(payload): JsonBody<UpdateSiteStatus>,
) -> StoreResult<Json<SiteStatus>> {
    let existing = state.store.get(&SiteStatus::SINGLETON_ID).await?;
    let is_new = existing.is_none();

    let mut status = existing.unwrap_or_default();
    status.is_live = payload.is_live;
    status.maintenance_message = filters::non_blank(payload.maintenance_message);
    status.touch();

    let saved = if is_new {
        state.store.create(status).await?
    } else {
        state.store.update(&SiteStatus::SINGLETON_ID, status).await?
    };

    if saved.is_live {
        tracing::info!("storefront is live");
    } else {
        tracing::warn!(message = ?saved.maintenance_message, "storefront in maintenance mode");
    }
    Ok(Json(saved))
}
