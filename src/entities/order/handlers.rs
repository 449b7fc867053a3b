//! Order HTTP handlers

use super::model::{CreateOrder, Order, OrderQuery, UpdateOrderStatus};
use crate::commerce::{DashboardStats, OrderService, OrderStatus};
use crate::core::validation::{JsonBody, Validated};
use crate::core::{DataService, PageRequest, PaginatedResponse, StoreResult};
use crate::entities::product::Product;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// Order-specific AppState
#[derive(Clone)]
pub struct OrderAppState {
    pub service: OrderService,
    pub products: Arc<dyn DataService<Product>>,
    pub low_stock_threshold: u32,
}

/// Order as the back office sees it, with the statuses the UI should offer
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOrderView {
    #[serde(flatten)]
    pub order: Order,
    pub available_transitions: &'static [OrderStatus],
}

impl From<Order> for AdminOrderView {
    fn from(order: Order) -> Self {
        let available_transitions = order.status.suggested_transitions();
        Self {
            order,
            available_transitions,
        }
    }
}

/// `POST /orders`
pub async fn create_order(
    State(state): State<OrderAppState>,
    Validated(input): Validated<CreateOrder>,
) -> StoreResult<(StatusCode, Json<Order>)> {
    let order = state.service.place_order(input).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// `GET /orders/{order_id}`
pub async fn track_order(
    State(state): State<OrderAppState>,
    Path(order_id): Path<String>,
) -> StoreResult<Json<Order>> {
    state.service.find_by_order_id(&order_id).await.map(Json)
}

pub async fn list_orders(
    State(state): State<OrderAppState>,
    Query(query): Query<OrderQuery>,
) -> StoreResult<Json<PaginatedResponse<AdminOrderView>>> {
    let status = match query.status.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => Some(raw.parse::<OrderStatus>()?),
        _ => None,
    };

    let orders = state.service.list(status, query.search.as_deref()).await?;
    let page = PageRequest::new(query.page, query.limit)
        .paginate(orders)
        .map(AdminOrderView::from);
    Ok(Json(page))
}

pub async fn get_order(
    State(state): State<OrderAppState>,
    Path(id): Path<String>,
) -> StoreResult<Json<AdminOrderView>> {
    let id = Uuid::parse_str(&id)?;
    let order = state.service.get(&id).await?;
    Ok(Json(order.into()))
}

/// `PATCH /admin/orders/{id}`; the body may carry `status` and nothing else
pub async fn update_order_status(
    State(state): State<OrderAppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateOrderStatus>,
) -> StoreResult<Json<AdminOrderView>> {
    let id = Uuid::parse_str(&id)?;
    let status: OrderStatus = payload.status.parse()?;
    let order = state.service.update_status(&id, status).await?;
    Ok(Json(order.into()))
}

pub async fn delete_order(
    State(state): State<OrderAppState>,
    Path(id): Path<String>,
) -> StoreResult<StatusCode> {
    let id = Uuid::parse_str(&id)?;
    state.service.delete_order(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /admin/orders/{id}/receipt`
pub async fn delete_receipt(
    State(state): State<OrderAppState>,
    Path(id): Path<String>,
) -> StoreResult<Json<AdminOrderView>> {
    let id = Uuid::parse_str(&id)?;
    let order = state.service.remove_receipt(&id).await?;
    Ok(Json(order.into()))
}

/// `GET /admin/stats`
pub async fn dashboard_stats(State(state): State<OrderAppState>) -> StoreResult<Json<DashboardStats>> {
    let orders = state.service.list(None, None).await?;
    let products = state.products.list().await?;
    Ok(Json(DashboardStats::compute(
        &orders,
        &products,
        state.low_stock_threshold,
    )))
}
