//! Order document and checkout payload

use crate::commerce::pricing::OrderTotals;
use crate::commerce::workflow::OrderStatus;
use crate::core::field::FieldValue;
use crate::core::validation::filters;
use crate::core::Entity;
use crate::media::HostedImage;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[validate(length(min = 1, message = "first name is required"))]
    #[serde(deserialize_with = "filters::trimmed")]
    pub first_name: String,
    #[validate(length(min = 1, message = "last name is required"))]
    #[serde(deserialize_with = "filters::trimmed")]
    pub last_name: String,
    #[validate(email(message = "email is not valid"))]
    #[serde(deserialize_with = "filters::trimmed")]
    pub email: String,
    #[validate(length(min = 1, message = "phone is required"))]
    #[serde(deserialize_with = "filters::trimmed")]
    pub phone: String,
    #[validate(length(min = 1, message = "address is required"))]
    #[serde(deserialize_with = "filters::trimmed")]
    pub full_address: String,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A purchased line; `id` is the product id as the client sent it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[validate(length(min = 1, message = "item id is required"))]
    pub id: String,
    #[validate(length(min = 1, message = "item name is required"))]
    pub name: String,
    #[validate(range(min = 0.0, message = "price cannot be negative"))]
    pub price: f64,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cod,
    Easypaisa,
    Jazzcash,
}

impl PaymentMethod {
    /// Mobile-wallet methods are paid up front and carry a receipt screenshot
    pub fn takes_receipt(&self) -> bool {
        matches!(self, PaymentMethod::Easypaisa | PaymentMethod::Jazzcash)
    }
}

/// Promo code snapshot stored on the order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedPromo {
    pub code: String,
    pub discount_percentage: f64,
    pub promo_code_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_image: Option<HostedImage>,
    pub subtotal: f64,
    pub shipping: f64,
    pub discount: f64,
    pub tax: f64,
    pub total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo_code: Option<AppliedPromo>,
}

impl Payment {
    pub fn totals(&self) -> OrderTotals {
        OrderTotals {
            subtotal: self.subtotal,
            shipping: self.shipping,
            tax: self.tax,
            discount: self.discount,
            total: self.total,
        }
    }

    pub fn set_totals(&mut self, totals: OrderTotals) {
        self.subtotal = totals.subtotal;
        self.shipping = totals.shipping;
        self.tax = totals.tax;
        self.discount = totals.discount;
        self.total = totals.total;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippingMethod {
    Standard,
    Express,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[validate(length(min = 1, message = "street is required"))]
    #[serde(deserialize_with = "filters::trimmed")]
    pub street: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apartment: Option<String>,
    #[validate(length(min = 1, message = "city is required"))]
    #[serde(deserialize_with = "filters::trimmed")]
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[validate(length(min = 1, message = "zip code is required"))]
    #[serde(deserialize_with = "filters::trimmed")]
    pub zip_code: String,
    #[validate(length(min = 1, message = "country is required"))]
    #[serde(deserialize_with = "filters::trimmed")]
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Shipping {
    pub method: ShippingMethod,
    #[validate(nested)]
    pub address: Address,
}

/// A placed order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub order_id: String,
    pub order_date: DateTime<Utc>,
    pub estimated_delivery_date: DateTime<Utc>,
    pub customer: Customer,
    pub items: Vec<OrderItem>,
    pub payment: Payment,
    pub shipping: Shipping,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Case-insensitive match on order id, customer name or email
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.order_id.to_lowercase().contains(&needle)
            || self.customer.full_name().to_lowercase().contains(&needle)
            || self.customer.email.to_lowercase().contains(&needle)
    }
}

impl Entity for Order {
    fn resource_name() -> &'static str {
        "orders"
    }

    fn resource_name_singular() -> &'static str {
        "order"
    }

    fn unique_fields() -> &'static [&'static str] {
        &["orderId"]
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
            "orderId" => Some(FieldValue::from(self.order_id.as_str())),
            "status" => Some(FieldValue::from(self.status.as_str())),
            _ => None,
        }
    }
}

/// Promo code reference in a checkout payload: a bare code or `{ "code": ... }`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PromoCodeRef {
    Code(String),
    Object { code: String },
}

impl PromoCodeRef {
    pub fn code(&self) -> &str {
        match self {
            PromoCodeRef::Code(code) | PromoCodeRef::Object { code } => code,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInput {
    pub method: PaymentMethod,
    /// Inline base64 receipt screenshot
    #[serde(default)]
    pub receipt_image: Option<String>,
    #[validate(range(min = 0.0, message = "subtotal cannot be negative"))]
    pub subtotal: f64,
    #[validate(range(min = 0.0, message = "shipping cannot be negative"))]
    #[serde(default)]
    pub shipping: f64,
    #[validate(range(min = 0.0, message = "discount cannot be negative"))]
    #[serde(default)]
    pub discount: f64,
    #[validate(range(min = 0.0, message = "tax cannot be negative"))]
    #[serde(default)]
    pub tax: f64,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub promo_code: Option<PromoCodeRef>,
}

impl PaymentInput {
    pub fn totals(&self) -> OrderTotals {
        OrderTotals {
            subtotal: self.subtotal,
            shipping: self.shipping,
            tax: self.tax,
            discount: self.discount,
            total: self.total,
        }
    }
}

/// Public checkout payload for `POST /orders`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrder {
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub order_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub estimated_delivery_date: Option<DateTime<Utc>>,
    #[validate(nested)]
    pub customer: Customer,
    #[validate(length(min = 1, message = "order must contain at least one item"))]
    #[validate(nested)]
    pub items: Vec<OrderItem>,
    #[validate(nested)]
    pub payment: PaymentInput,
    #[validate(nested)]
    pub shipping: Shipping,
}

/// Delivery estimate windows, in days
#[derive(Debug, Clone, Copy)]
pub struct DeliveryWindow {
    pub standard_days: i64,
    pub express_days: i64,
}

impl Default for DeliveryWindow {
    fn default() -> Self {
        Self {
            standard_days: 5,
            express_days: 2,
        }
    }
}

impl DeliveryWindow {
    pub fn estimate(&self, order_date: DateTime<Utc>, method: ShippingMethod) -> DateTime<Utc> {
        let days = match method {
            ShippingMethod::Standard => self.standard_days,
            ShippingMethod::Express => self.express_days,
        };
        order_date + Duration::days(days)
    }
}

/// Query string of `GET /admin/orders`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub status: Option<String>,
    pub search: Option<String>,
}

/// Admin payload for `PATCH /admin/orders/{id}`: only the status may change
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateOrderStatus {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn checkout_json() -> serde_json::Value {
        json!({
            "customer": {
                "firstName": "Ayesha",
                "lastName": "Khan",
                "email": "ayesha@example.com",
                "phone": "03001234567",
                "fullAddress": "12 Mall Road, Lahore"
            },
            "items": [
                { "id": "p1", "name": "Lawn Kurta", "price": 3000, "quantity": 2, "size": "M" }
            ],
            "payment": { "method": "cod", "subtotal": 6000, "shipping": 200, "tax": 0, "total": 6200 },
            "shipping": {
                "method": "standard",
                "address": { "street": "12 Mall Road", "city": "Lahore", "zipCode": "54000", "country": "Pakistan" }
            }
        })
    }

    #[test]
    fn test_checkout_payload_parses_and_validates() {
        let payload: CreateOrder = serde_json::from_value(checkout_json()).unwrap();
        assert!(payload.validate().is_ok());
        assert_eq!(payload.payment.method, PaymentMethod::Cod);
        assert_eq!(payload.items[0].quantity, 2);
    }

    #[test]
    fn test_nested_errors_are_reported_with_paths() {
        let mut body = checkout_json();
        body["customer"]["email"] = json!("not-an-email");
        body["items"][0]["quantity"] = json!(0);
        let payload: CreateOrder = serde_json::from_value(body).unwrap();

        let err: crate::core::error::StoreError = payload.validate().unwrap_err().into();
        let message = err.to_string();
        assert!(message.contains("customer.email"), "{}", message);
        assert!(message.contains("items[0].quantity"), "{}", message);
    }

    #[test]
    fn test_empty_items_rejected() {
        let mut body = checkout_json();
        body["items"] = json!([]);
        let payload: CreateOrder = serde_json::from_value(body).unwrap();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_unknown_payment_method_fails_to_parse() {
        let mut body = checkout_json();
        body["payment"]["method"] = json!("bitcoin");
        assert!(serde_json::from_value::<CreateOrder>(body).is_err());
    }

    #[test]
    fn test_promo_code_ref_forms() {
        let bare: PromoCodeRef = serde_json::from_value(json!("save10")).unwrap();
        let object: PromoCodeRef = serde_json::from_value(json!({"code": "save10"})).unwrap();
        assert_eq!(bare.code(), "save10");
        assert_eq!(object.code(), "save10");
    }

    #[test]
    fn test_delivery_window() {
        let now = Utc::now();
        let window = DeliveryWindow::default();
        assert_eq!(window.estimate(now, ShippingMethod::Standard), now + Duration::days(5));
        assert_eq!(window.estimate(now, ShippingMethod::Express), now + Duration::days(2));
    }

    #[test]
    fn test_status_patch_rejects_other_fields() {
        assert!(serde_json::from_value::<UpdateOrderStatus>(json!({"status": "shipped"})).is_ok());
        assert!(
            serde_json::from_value::<UpdateOrderStatus>(json!({"status": "shipped", "total": 0}))
                .is_err()
        );
    }
}
