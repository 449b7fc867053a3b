//! Product document, admin payloads and catalog query

use crate::core::field::FieldValue;
use crate::core::Entity;
use crate::media::{HostedImage, ImageInput};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Men,
    Women,
    Unisex,
    Kids,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Men => "men",
            Gender::Women => "women",
            Gender::Unisex => "unisex",
            Gender::Kids => "kids",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductTag {
    NewArrival,
    Featured,
    MrShahCollection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    pub category: Uuid,
    #[serde(rename = "type")]
    pub product_type: Uuid,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    pub gender: Gender,
    #[serde(default)]
    pub images: Vec<HostedImage>,
    pub stock: u32,
    pub is_active: bool,
    #[serde(default)]
    pub product_tags: Vec<ProductTag>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Product {
    fn resource_name() -> &'static str {
        "products"
    }

    fn resource_name_singular() -> &'static str {
        "product"
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
            "name" => Some(FieldValue::from(self.name.as_str())),
            "category" => Some(FieldValue::from(self.category)),
            "type" => Some(FieldValue::from(self.product_type)),
            "gender" => Some(FieldValue::from(self.gender.as_str())),
            "isActive" => Some(FieldValue::from(self.is_active)),
            _ => None,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Admin payload for `POST /admin/products`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0.0, message = "price cannot be negative"))]
    pub price: f64,
    #[validate(range(min = 0.0, message = "originalPrice cannot be negative"))]
    #[serde(default)]
    pub original_price: Option<f64>,
    pub category: Uuid,
    #[serde(rename = "type")]
    pub product_type: Uuid,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    pub gender: Gender,
    #[serde(default)]
    pub images: Vec<ImageInput>,
    #[serde(default)]
    pub stock: u32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub product_tags: Vec<ProductTag>,
}

/// Admin payload for `PATCH /admin/products/{id}`; absent fields are left alone
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "price cannot be negative"))]
    pub price: Option<f64>,
    /// `null` clears the list price
    #[serde(default, with = "double_option")]
    pub original_price: Option<Option<f64>>,
    pub category: Option<Uuid>,
    #[serde(rename = "type")]
    pub product_type: Option<Uuid>,
    pub sizes: Option<Vec<String>>,
    pub colors: Option<Vec<String>>,
    pub gender: Option<Gender>,
    /// Replaces the image list; hosted images missing from it are destroyed
    pub images: Option<Vec<ImageInput>>,
    pub stock: Option<u32>,
    pub is_active: Option<bool>,
    pub product_tags: Option<Vec<ProductTag>>,
}

/// Distinguish an absent field from an explicit `null`
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

/// Sort orders accepted by the catalog listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSort {
    PriceAsc,
    PriceDesc,
    CreatedAtAsc,
    CreatedAtDesc,
    NameAsc,
    NameDesc,
}

impl ProductSort {
    /// Parse `field:direction` (`price:asc`, `createdAt:desc`, `name:asc`)
    pub fn parse(raw: &str) -> Option<Self> {
        let (field, direction) = raw.split_once(':').unwrap_or((raw, "asc"));
        let descending = match direction.to_ascii_lowercase().as_str() {
            "asc" => false,
            "desc" => true,
            _ => return None,
        };
        let sort = match (field, descending) {
            ("price", false) => ProductSort::PriceAsc,
            ("price", true) => ProductSort::PriceDesc,
            ("createdAt", false) => ProductSort::CreatedAtAsc,
            ("createdAt", true) => ProductSort::CreatedAtDesc,
            ("name", false) => ProductSort::NameAsc,
            ("name", true) => ProductSort::NameDesc,
            _ => return None,
        };
        Some(sort)
    }

    pub fn sort(&self, products: &mut [Product]) {
        match self {
            ProductSort::PriceAsc => products.sort_by(|a, b| a.price.total_cmp(&b.price)),
            ProductSort::PriceDesc => products.sort_by(|a, b| b.price.total_cmp(&a.price)),
            ProductSort::CreatedAtAsc => products.sort_by_key(|p| p.created_at),
            ProductSort::CreatedAtDesc => products.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            ProductSort::NameAsc => products.sort_by_key(|p| p.name.to_lowercase()),
            ProductSort::NameDesc => {
                products.sort_by(|a, b| b.name.to_lowercase().cmp(&a.name.to_lowercase()))
            }
        }
    }
}

/// Query string of `GET /products`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub category: Option<Uuid>,
    #[serde(rename = "type")]
    pub product_type: Option<Uuid>,
    pub gender: Option<Gender>,
    pub tag: Option<ProductTag>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub search: Option<String>,
    pub in_stock: Option<bool>,
    pub sort: Option<String>,
}

impl ProductQuery {
    pub fn matches(&self, product: &Product) -> bool {
        self.category.is_none_or(|c| product.category == c)
            && self.product_type.is_none_or(|t| product.product_type == t)
            && self.gender.is_none_or(|g| product.gender == g)
            && self.tag.is_none_or(|t| product.product_tags.contains(&t))
            && self.min_price.is_none_or(|min| product.price >= min)
            && self.max_price.is_none_or(|max| product.price <= max)
            && self.in_stock.is_none_or(|wanted| (product.stock > 0) == wanted)
            && self.search.as_deref().is_none_or(|s| {
                product
                    .name
                    .to_lowercase()
                    .contains(&s.trim().to_lowercase())
            })
    }
}
