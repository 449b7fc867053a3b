//! Admin dashboard figures

use crate::commerce::pricing::round2;
use crate::commerce::workflow::OrderStatus;
use crate::entities::order::Order;
use crate::entities::product::Product;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_orders: usize,
    /// Every status is present, zero when no order has it
    pub orders_by_status: BTreeMap<&'static str, usize>,
    /// Sum of totals over orders that are not cancelled
    pub revenue: f64,
    pub total_products: usize,
    pub low_stock_products: usize,
}

impl DashboardStats {
    pub fn compute(orders: &[Order], products: &[Product], low_stock_threshold: u32) -> Self {
        let mut orders_by_status: BTreeMap<&'static str, usize> =
            OrderStatus::ALL.iter().map(|s| (s.as_str(), 0)).collect();
        for order in orders {
            *orders_by_status.entry(order.status.as_str()).or_default() += 1;
        }

        let revenue = round2(
            orders
                .iter()
                .filter(|o| o.status != OrderStatus::Cancelled)
                .map(|o| o.payment.total)
                .sum(),
        );

        Self {
            total_orders: orders.len(),
            orders_by_status,
            revenue,
            total_products: products.len(),
            low_stock_products: products
                .iter()
                .filter(|p| p.stock <= low_stock_threshold)
                .count(),
        }
    }
}
