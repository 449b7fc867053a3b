//! Review document

use crate::core::field::FieldValue;
use crate::core::validation::filters;
use crate::core::Entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub product: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub rating: u8,
    pub comment: String,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Review {
    fn resource_name() -> &'static str {
        "reviews"
    }

    fn resource_name_singular() -> &'static str {
        "review"
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
            "product" => Some(FieldValue::from(self.product)),
            "isApproved" => Some(FieldValue::from(self.is_approved)),
            _ => None,
        }
    }
}

/// Public payload for `POST /products/{id}/reviews`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateReview {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(email(message = "email is not valid"))]
    #[serde(default)]
    pub email: Option<String>,
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: u8,
    #[validate(length(min = 1, max = 2000, message = "comment must be 1-2000 characters"))]
    pub comment: String,
}

impl CreateReview {
    pub fn into_review(self, product: Uuid) -> Review {
        let now = Utc::now();
        Review {
            id: Uuid::new_v4(),
            product,
            name: filters::trim(&self.name),
            email: filters::non_blank(self.email).map(|e| filters::lowercase(&e)),
            rating: self.rating,
            comment: filters::trim(&self.comment),
            is_approved: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Query string of `GET /admin/reviews`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub product: Option<Uuid>,
}

/// Approved-review aggregate shown on product pages
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    pub average_rating: f64,
    pub review_count: usize,
}

impl RatingSummary {
    /// Aggregate approved reviews; the average is rounded to one decimal
    pub fn of<'a>(reviews: impl IntoIterator<Item = &'a Review>) -> Self {
        let (sum, count) = reviews
            .into_iter()
            .filter(|r| r.is_approved)
            .fold((0u32, 0usize), |(sum, count), r| (sum + r.rating as u32, count + 1));
        if count == 0 {
            return Self::default();
        }
        Self {
            average_rating: filters::round_decimals(sum as f64 / count as f64, 1),
            review_count: count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: u8, approved: bool) -> Review {
        let mut review = CreateReview {
            name: "Sana".to_string(),
            email: None,
            rating,
            comment: "Lovely fabric".to_string(),
        }
        .into_review(Uuid::new_v4());
        review.is_approved = approved;
        review
    }

    #[test]
    fn test_rating_summary_ignores_unapproved() {
        let reviews = vec![review(5, true), review(4, true), review(1, false)];
        let summary = RatingSummary::of(&reviews);
        assert_eq!(summary.review_count, 2);
        assert_eq!(summary.average_rating, 4.5);
    }

    #[test]
    fn test_rating_summary_empty() {
        assert_eq!(RatingSummary::of(&Vec::<Review>::new()), RatingSummary::default());
    }

    #[test]
    fn test_rating_out_of_range_rejected() {
        let payload: CreateReview =
            serde_json::from_str(r#"{"name":"A","rating":6,"comment":"x"}"#).unwrap();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_email_normalised() {
        let review = CreateReview {
            name: " Ali ".to_string(),
            email: Some(" Ali@Example.COM ".to_string()),
            rating: 3,
            comment: "ok".to_string(),
        }
        .into_review(Uuid::new_v4());
        assert_eq!(review.name, "Ali");
        assert_eq!(review.email.as_deref(), Some("ali@example.com"));
    }
}
