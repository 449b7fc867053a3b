//! Site status singleton

use crate::core::field::FieldValue;
use crate::core::Entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether the storefront is open, stored as one document with the nil id
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteStatus {
    pub id: Uuid,
    pub is_live: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SiteStatus {
    pub const SINGLETON_ID: Uuid = Uuid::nil();

    pub fn live() -> Self {
        let now = Utc::now();
        Self {
            id: Self::SINGLETON_ID,
            is_live: true,
            maintenance_message: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Default for SiteStatus {
    fn default() -> Self {
        Self::live()
    }
}

impl Entity for SiteStatus {
    fn resource_name() -> &'static str {
        "site_status"
    }

    fn resource_name_singular() -> &'static str {
        "site_status"
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
            "isLive" => Some(FieldValue::from(self.is_live)),
            _ => None,
        }
    }
}

/// Admin payload for `PUT /admin/site-status`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateSiteStatus {
    pub is_live: bool,
    #[serde(default)]
    pub maintenance_message: Option<String>,
}
