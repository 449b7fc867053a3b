//! Entity descriptor for ProductType

use super::handlers::{
    ProductTypeAppState, create_product_type, delete_product_type, get_product_type,
    list_product_types, update_product_type,
};
use crate::server::entity_registry::EntityDescriptor;
use axum::{
    Router,
    routing::{get, patch, post},
};

pub struct ProductTypeDescriptor {
    pub state: ProductTypeAppState,
}

impl ProductTypeDescriptor {
    pub fn new(state: ProductTypeAppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for ProductTypeDescriptor {
    fn entity_type(&self) -> &str {
        "product_type"
    }

    fn plural(&self) -> &str {
        "types"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/types", get(list_product_types))
            .route("/types/{id}", get(get_product_type))
            .with_state(self.state.clone())
    }

    fn build_admin_routes(&self) -> Router {
        Router::new()
            .route("/types", post(create_product_type))
            .route(
                "/types/{id}",
                patch(update_product_type).delete(delete_product_type),
            )
            .with_state(self.state.clone())
    }
}
