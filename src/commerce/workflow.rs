//! Order status workflow
//!
//! The happy path is `pending -> confirmed -> shipped -> delivered`, with
//! `cancelled` reachable from any non-terminal state. The stored status
//! accepts any value: admins may move an order anywhere, including out of a
//! terminal state. Such reopenings are allowed but logged.

use crate::core::error::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Transitions offered to an admin from this status
    pub fn suggested_transitions(&self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Pending => &[OrderStatus::Confirmed, OrderStatus::Cancelled],
            OrderStatus::Confirmed => &[OrderStatus::Shipped, OrderStatus::Cancelled],
            OrderStatus::Shipped => &[OrderStatus::Delivered, OrderStatus::Cancelled],
            OrderStatus::Delivered | OrderStatus::Cancelled => &[],
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                StoreError::field(
                    "status",
                    format!(
                        "unknown status '{}', expected one of pending, confirmed, shipped, delivered, cancelled",
                        s
                    ),
                )
            })
    }
}

/// How a requested status change relates to the suggested workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Same status as before
    Unchanged,
    /// One of the suggested transitions
    Forward,
    /// Skips or rewinds a step of the happy path
    OffPath,
    /// Moves an order out of `delivered` or `cancelled`
    Reopen,
}

/// Classify a status change; every change is permitted
pub fn classify(from: OrderStatus, to: OrderStatus) -> Transition {
    if from == to {
        Transition::Unchanged
    } else if from.is_terminal() {
        Transition::Reopen
    } else if from.suggested_transitions().contains(&to) {
        Transition::Forward
    } else {
        Transition::OffPath
    }
}
