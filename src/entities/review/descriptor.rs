//! Entity descriptor for Review

use super::handlers::{
    ReviewAppState, create_review, delete_review, list_product_reviews, list_reviews,
};
use crate::server::entity_registry::EntityDescriptor;
use axum::{
    Router,
    routing::{delete, get},
};

pub struct ReviewDescriptor {
    pub state: ReviewAppState,
}

impl ReviewDescriptor {
    pub fn new(state: ReviewAppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for ReviewDescriptor {
    fn entity_type(&self) -> &str {
        "review"
    }

    fn plural(&self) -> &str {
        "reviews"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route(
                "/products/{id}/reviews",
                get(list_product_reviews).post(create_review),
            )
            .with_state(self.state.clone())
    }

    fn build_admin_routes(&self) -> Router {
        Router::new()
            .route("/reviews", get(list_reviews))
            .route("/reviews/{id}", delete(delete_review))
            .with_state(self.state.clone())
    }
}
