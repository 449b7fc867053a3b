//! ProductType document and admin payloads

use crate::core::field::FieldValue;
use crate::core::validation::filters;
use crate::core::Entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductType {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Uuid>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductType {
    pub fn new(name: &str, category: Option<Uuid>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: filters::trim(name),
            slug: filters::slug(name),
            category,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn rename(&mut self, name: &str) {
        self.name = filters::trim(name);
        self.slug = filters::slug(name);
    }
}

impl Entity for ProductType {
    fn resource_name() -> &'static str {
        "product_types"
    }

    fn resource_name_singular() -> &'static str {
        "product_type"
    }

    fn unique_fields() -> &'static [&'static str] {
        &["slug"]
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
            "slug" => Some(FieldValue::from(self.slug.as_str())),
            "category" => Some(FieldValue::from(self.category)),
            "isActive" => Some(FieldValue::from(self.is_active)),
            _ => None,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateProductType {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[serde(default)]
    pub category: Option<Uuid>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateProductType {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,
    pub category: Option<Uuid>,
    pub is_active: Option<bool>,
}
