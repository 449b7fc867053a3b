//! Order service: checkout, tracking and the admin order lifecycle

use crate::commerce::order_id;
use crate::commerce::promo::PromoCodeValidator;
use crate::commerce::workflow::{self, OrderStatus, Transition};
use crate::core::error::{StoreError, StoreResult};
use crate::core::validation::filters;
use crate::core::{DataService, Entity};
use crate::entities::order::{AppliedPromo, CreateOrder, DeliveryWindow, Order, Payment};
use crate::media::{HostedImage, ImageHost};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Image host folder for payment receipts
pub const RECEIPT_FOLDER: &str = "receipts";

/// Order operations shared by the public checkout and the admin back office
#[derive(Clone)]
pub struct OrderService {
    orders: Arc<dyn DataService<Order>>,
    promos: PromoCodeValidator,
    images: Arc<dyn ImageHost>,
    delivery: DeliveryWindow,
}

impl OrderService {
    pub fn new(
        orders: Arc<dyn DataService<Order>>,
        promos: PromoCodeValidator,
        images: Arc<dyn ImageHost>,
    ) -> Self {
        Self {
            orders,
            promos,
            images,
            delivery: DeliveryWindow::default(),
        }
    }

    pub fn with_delivery_window(mut self, delivery: DeliveryWindow) -> Self {
        self.delivery = delivery;
        self
    }

    /// Place an order
    ///
    /// Generates the order id when absent, uploads a wallet receipt, applies
    /// the promo code, then persists. A receipt uploaded for an order that
    /// fails to persist is destroyed again.
    pub async fn place_order(&self, input: CreateOrder) -> StoreResult<Order> {
        let order_id = match filters::non_blank(input.order_id) {
            Some(id) => id,
            None => order_id::generate(),
        };

        let method = input.payment.method;
        let mut totals = input.payment.totals();

        let promo_code = match &input.payment.promo_code {
            Some(reference) if !reference.code().trim().is_empty() => {
                let promo = self
                    .promos
                    .validate(reference.code(), input.payment.subtotal)
                    .await?;
                if totals.apply_promo(promo.discount_percentage) {
                    tracing::debug!(%order_id, code = %promo.code, discount = totals.discount, "promo discount computed");
                } else {
                    totals.fill_missing_total();
                }
                Some(AppliedPromo {
                    code: promo.code,
                    discount_percentage: promo.discount_percentage,
                    promo_code_id: promo.id,
                })
            }
            _ => {
                totals.fill_missing_total();
                None
            }
        };

        let receipt_image = match filters::non_blank(input.payment.receipt_image) {
            Some(payload) if method.takes_receipt() => {
                Some(self.images.upload(&payload, RECEIPT_FOLDER).await?)
            }
            Some(_) => {
                tracing::debug!(%order_id, "receipt ignored for cash on delivery");
                None
            }
            None => None,
        };

        let now = Utc::now();
        let order_date = input.order_date.unwrap_or(now);
        let estimated_delivery_date = input
            .estimated_delivery_date
            .unwrap_or_else(|| self.delivery.estimate(order_date, input.shipping.method));

        let mut payment = Payment {
            method,
            receipt_image,
            subtotal: 0.0,
            shipping: 0.0,
            discount: 0.0,
            tax: 0.0,
            total: 0.0,
            promo_code,
        };
        payment.set_totals(totals);

        let order = Order {
            id: Uuid::new_v4(),
            order_id,
            order_date,
            estimated_delivery_date,
            customer: input.customer,
            items: input.items,
            payment,
            shipping: input.shipping,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        match self.orders.create(order.clone()).await {
            Ok(created) => {
                tracing::info!(
                    order_id = %created.order_id,
                    total = created.payment.total,
                    method = ?created.payment.method,
                    "order created"
                );
                Ok(created)
            }
            Err(e) => {
                if let Some(receipt) = &order.payment.receipt_image {
                    self.discard_image(receipt).await;
                }
                Err(e.into())
            }
        }
    }

    pub async fn get(&self, id: &Uuid) -> StoreResult<Order> {
        self.orders
            .get(id)
            .await?
            .ok_or_else(|| StoreError::not_found(Order::resource_name_singular(), id))
    }

    /// Public order tracking by the human-readable id
    pub async fn find_by_order_id(&self, order_id: &str) -> StoreResult<Order> {
        let order_id = order_id.trim();
        self.orders
            .find_one("orderId", order_id)
            .await?
            .ok_or_else(|| StoreError::not_found(Order::resource_name_singular(), order_id))
    }

    /// All orders, newest first, optionally filtered by status and a search term
    pub async fn list(
        &self,
        status: Option<OrderStatus>,
        search: Option<&str>,
    ) -> StoreResult<Vec<Order>> {
        let orders = match status {
            Some(status) => self.orders.search("status", status.as_str()).await?,
            None => self.orders.list().await?,
        };
        let mut orders: Vec<Order> = orders
            .into_iter()
            .filter(|o| search.is_none_or(|s| o.matches_search(s)))
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    pub async fn update_status(&self, id: &Uuid, status: OrderStatus) -> StoreResult<Order> {
        let mut order = self.get(id).await?;
        let previous = order.status;

        match workflow::classify(previous, status) {
            Transition::Unchanged => return Ok(order),
            Transition::Reopen => tracing::warn!(
                order_id = %order.order_id,
                from = %previous,
                to = %status,
                "reopening an order from a terminal status"
            ),
            Transition::OffPath => tracing::info!(
                order_id = %order.order_id,
                from = %previous,
                to = %status,
                "status change skips the usual workflow"
            ),
            Transition::Forward => {}
        }

        order.status = status;
        order.touch();
        let updated = self.orders.update(id, order).await?;
        tracing::info!(order_id = %updated.order_id, from = %previous, to = %status, "order status changed");
        Ok(updated)
    }

    /// Delete an order and its hosted receipt
    pub async fn delete_order(&self, id: &Uuid) -> StoreResult<Order> {
        let order = self.get(id).await?;

        if let Some(receipt) = &order.payment.receipt_image {
            self.images.destroy(&receipt.public_id).await?;
        }

        let removed = self
            .orders
            .delete(id)
            .await?
            .ok_or_else(|| StoreError::not_found(Order::resource_name_singular(), id))?;
        tracing::info!(order_id = %removed.order_id, "order deleted");
        Ok(removed)
    }

    /// Destroy the hosted receipt and clear it from the order
    pub async fn remove_receipt(&self, id: &Uuid) -> StoreResult<Order> {
        let mut order = self.get(id).await?;

        let Some(receipt) = order.payment.receipt_image.take() else {
            return Err(StoreError::not_found("receipt", id));
        };
        self.images.destroy(&receipt.public_id).await?;

        order.touch();
        let updated = self.orders.update(id, order).await?;
        tracing::info!(order_id = %updated.order_id, public_id = %receipt.public_id, "receipt removed");
        Ok(updated)
    }

    async fn discard_image(&self, image: &HostedImage) {
        if let Err(e) = self.images.destroy(&image.public_id).await {
            tracing::warn!(public_id = %image.public_id, error = %e, "failed to clean up orphaned receipt");
        }
    }
}
