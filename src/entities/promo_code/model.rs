//! PromoCode document and its input payloads

use crate::core::field::FieldValue;
use crate::core::validation::filters;
use crate::core::Entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A percentage discount code, stored uppercased
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoCode {
    pub id: Uuid,
    pub code: String,
    pub discount_percentage: f64,
    pub min_order_amount: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PromoCode {
    pub fn new(code: &str, discount_percentage: f64, min_order_amount: f64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            code: filters::uppercase(code),
            discount_percentage,
            min_order_amount,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for PromoCode {
    fn resource_name() -> &'static str {
        "promo_codes"
    }

    fn resource_name_singular() -> &'static str {
        "promo_code"
    }

    fn unique_fields() -> &'static [&'static str] {
        &["code"]
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "code" => Some(FieldValue::from(self.code.as_str())),
            "isActive" => Some(FieldValue::from(self.is_active)),
            _ => None,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Admin payload for `POST /admin/promo-codes`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreatePromoCode {
    #[validate(length(min = 1, max = 32, message = "code must be 1-32 characters"))]
    #[serde(deserialize_with = "filters::trimmed")]
    pub code: String,

    #[validate(range(min = 1.0, max = 100.0, message = "discountPercentage must be between 1 and 100"))]
    pub discount_percentage: f64,

    #[validate(range(min = 0.0, message = "minOrderAmount cannot be negative"))]
    #[serde(default)]
    pub min_order_amount: f64,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl CreatePromoCode {
    pub fn into_promo_code(self) -> PromoCode {
        let mut promo = PromoCode::new(&self.code, self.discount_percentage, self.min_order_amount);
        promo.is_active = self.is_active;
        promo
    }
}

/// Public payload for `POST /promo-codes/validate`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ValidatePromoCode {
    #[validate(length(min = 1, message = "code is required"))]
    pub code: String,

    #[validate(range(min = 0.0, message = "subtotal cannot be negative"))]
    pub subtotal: f64,
}
