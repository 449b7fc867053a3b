//! Human-readable order identifiers: `ORD-<6 digits>-<4 digits>`

use chrono::Utc;
use regex::Regex;
use std::sync::OnceLock;
use uuid::Uuid;

static ORDER_ID_PATTERN: OnceLock<Regex> = OnceLock::new();

fn order_id_pattern() -> &'static Regex {
    ORDER_ID_PATTERN.get_or_init(|| Regex::new(r"^ORD-\d{6}-\d{4}$").unwrap())
}

/// Generate a new order id
///
/// The first group is random in `100000..=999999`, the second is the last four
/// digits of the current millisecond timestamp. Uniqueness is ultimately
/// enforced by the unique index on `orderId`.
pub fn generate() -> String {
    let random = 100_000 + (Uuid::new_v4().as_u128() % 900_000) as u32;
    let stamp = Utc::now().timestamp_millis().rem_euclid(10_000);
    format!("ORD-{:06}-{:04}", random, stamp)
}

/// Whether a string has the order id shape
pub fn is_valid(order_id: &str) -> bool {
    order_id_pattern().is_match(order_id)
}
