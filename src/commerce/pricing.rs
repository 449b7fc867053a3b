//! Order total calculation
//!
//! Money is carried as `f64` and rounded to two decimals at every computed
//! boundary, halves away from zero.

use crate::core::validation::filters::round_decimals;
use serde::{Deserialize, Serialize};

/// Round a money amount to cents
pub fn round2(value: f64) -> f64 {
    round_decimals(value, 2)
}

/// Discount granted by a promo percentage on a subtotal
pub fn promo_discount(subtotal: f64, percentage: f64) -> f64 {
    round2(subtotal * percentage / 100.0)
}

/// `subtotal + shipping + tax - discount`, rounded
pub fn order_total(subtotal: f64, shipping: f64, tax: f64, discount: f64) -> f64 {
    round2(subtotal + shipping + tax - discount)
}

/// Markdown of a list price, as a whole percentage (0 when not marked down)
pub fn markdown_percentage(price: f64, original_price: Option<f64>) -> u32 {
    match original_price {
        Some(original) if original > 0.0 && original > price => {
            ((original - price) / original * 100.0).round() as u32
        }
        _ => 0,
    }
}

/// The money fields of an order's payment
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub subtotal: f64,
    pub shipping: f64,
    pub tax: f64,
    pub discount: f64,
    pub total: f64,
}

impl OrderTotals {
    /// Apply a promo percentage
    ///
    /// Only fills discount and total when the caller did not already supply a
    /// discount; returns whether anything was computed.
    pub fn apply_promo(&mut self, percentage: f64) -> bool {
        if self.discount != 0.0 {
            return false;
        }
        self.discount = promo_discount(self.subtotal, percentage);
        self.total = order_total(self.subtotal, self.shipping, self.tax, self.discount);
        true
    }

    /// Derive the total when the caller left it at zero
    pub fn fill_missing_total(&mut self) {
        if self.total == 0.0 {
            self.total = self.expected_total();
        }
    }

    pub fn expected_total(&self) -> f64 {
        order_total(self.subtotal, self.shipping, self.tax, self.discount)
    }
}
