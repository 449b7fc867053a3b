//! Entity descriptor for Category

use super::handlers::{
    CategoryAppState, create_category, delete_category, get_category, list_categories,
    update_category,
};
use crate::server::entity_registry::EntityDescriptor;
use axum::{
    Router,
    routing::{get, patch, post},
};

pub struct CategoryDescriptor {
    pub state: CategoryAppState,
}

impl CategoryDescriptor {
    pub fn new(state: CategoryAppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for CategoryDescriptor {
    fn entity_type(&self) -> &str {
        "category"
    }

    fn plural(&self) -> &str {
        "categories"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/categories", get(list_categories))
            .route("/categories/{id}", get(get_category))
            .with_state(self.state.clone())
    }

    fn build_admin_routes(&self) -> Router {
        Router::new()
            .route("/categories", post(create_category))
            .route(
                "/categories/{id}",
                patch(update_category).delete(delete_category),
            )
            .with_state(self.state.clone())
    }
}
