//! Shared test harness for storage backend testing
//!
//! Uses `PromoCode` as the sample document: it has a unique field (`code`),
//! a string and a boolean lookup field, which is everything the
//! `DataService` contract needs to exercise.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

use chrono::{Duration, Utc};
use storefront::entities::promo_code::PromoCode;

/// A promo code with a random id
pub fn create_test_promo(code: &str, discount_percentage: f64, active: bool) -> PromoCode {
    let mut promo = PromoCode::new(code, discount_percentage, 0.0);
    promo.is_active = active;
    promo
}

/// `n` promo codes `CODE0..CODEn`, each created one minute after the previous
///
/// Alternates active and inactive codes, starting with active.
pub fn sample_batch(n: usize) -> Vec<PromoCode> {
    let start = Utc::now() - Duration::hours(1);
    (0..n)
        .map(|i| {
            let mut promo = create_test_promo(&format!("CODE{}", i), 5.0 + i as f64, i % 2 == 0);
            promo.created_at = start + Duration::minutes(i as i64);
            promo.updated_at = promo.created_at;
            promo
        })
        .collect()
}

/// Assert that a list contains exactly `n` documents.
pub fn assert_count<T>(list: &[T], expected: usize) {
    assert_eq!(
        list.len(),
        expected,
        "Expected {} items, got {}",
        expected,
        list.len()
    );
}

#[macro_use]
pub mod data_service_tests;
