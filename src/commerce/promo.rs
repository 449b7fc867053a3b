//! Promo code validation against a candidate order

use crate::core::DataService;
use crate::core::error::PromoError;
use crate::core::validation::filters;
use crate::entities::promo_code::PromoCode;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// A promo code that may be applied to the order it was checked against
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedPromo {
    pub id: Uuid,
    pub code: String,
    pub discount_percentage: f64,
    pub min_order_amount: f64,
}

/// Looks up active promo codes, case-insensitively, and checks minimum order amounts
#[derive(Clone)]
pub struct PromoCodeValidator {
    promo_codes: Arc<dyn DataService<PromoCode>>,
}

impl PromoCodeValidator {
    pub fn new(promo_codes: Arc<dyn DataService<PromoCode>>) -> Self {
        Self { promo_codes }
    }

    pub async fn validate(&self, code: &str, subtotal: f64) -> Result<ValidatedPromo, PromoError> {
        let normalized = filters::uppercase(code);
        let not_found = || PromoError::NotFound {
            code: normalized.clone(),
        };

        if normalized.is_empty() {
            return Err(not_found());
        }

        let promo = self
            .promo_codes
            .search("code", &normalized)
            .await?
            .into_iter()
            .find(|p| p.is_active && p.code.eq_ignore_ascii_case(&normalized))
            .ok_or_else(not_found)?;

        if subtotal < promo.min_order_amount {
            return Err(PromoError::BelowMinimum {
                code: promo.code,
                min_order_amount: promo.min_order_amount,
            });
        }

        Ok(ValidatedPromo {
            id: promo.id,
            code: promo.code,
            discount_percentage: promo.discount_percentage,
            min_order_amount: promo.min_order_amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryDataService;

    async fn validator_with(promos: Vec<PromoCode>) -> PromoCodeValidator {
        let store = InMemoryDataService::<PromoCode>::new();
        for promo in promos {
            store.create(promo).await.unwrap();
        }
        PromoCodeValidator::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_lookup_is_case_insensitive() {
        let validator = validator_with(vec![PromoCode::new("SAVE10", 10.0, 0.0)]).await;

        for input in ["SAVE10", "save10", "Save10", "  save10 "] {
            let promo = validator.validate(input, 100.0).await.unwrap();
            assert_eq!(promo.code, "SAVE10");
            assert_eq!(promo.discount_percentage, 10.0);
        }
    }

    #[tokio::test]
    async fn test_unknown_code_not_found() {
        let validator = validator_with(vec![]).await;
        let err = validator.validate("NOPE", 100.0).await.unwrap_err();
        assert!(matches!(err, PromoError::NotFound { ref code } if code == "NOPE"));
    }

    #[tokio::test]
    async fn test_inactive_code_not_found() {
        let mut promo = PromoCode::new("OLD", 10.0, 0.0);
        promo.is_active = false;
        let validator = validator_with(vec![promo]).await;

        assert!(matches!(
            validator.validate("old", 100.0).await,
            Err(PromoError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_below_minimum() {
        let validator = validator_with(vec![PromoCode::new("SAVE50", 50.0, 5000.0)]).await;

        let err = validator.validate("SAVE50", 4999.99).await.unwrap_err();
        assert!(matches!(
            err,
            PromoError::BelowMinimum { min_order_amount, .. } if min_order_amount == 5000.0
        ));

        let promo = validator.validate("SAVE50", 6000.0).await.unwrap();
        assert_eq!(promo.min_order_amount, 5000.0);
    }

    #[tokio::test]
    async fn test_minimum_is_inclusive() {
        let validator = validator_with(vec![PromoCode::new("EXACT", 5.0, 1000.0)]).await;
        assert!(validator.validate("EXACT", 1000.0).await.is_ok());
    }

    #[tokio::test]
    async fn test_blank_code_not_found() {
        let validator = validator_with(vec![]).await;
        assert!(validator.validate("   ", 10.0).await.is_err());
    }
}
