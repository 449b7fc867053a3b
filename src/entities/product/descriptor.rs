//! Entity descriptor for Product

use super::handlers::{
    ProductAppState, create_product, delete_product, get_product, list_products, update_product,
};
use crate::server::entity_registry::EntityDescriptor;
use axum::{
    Router,
    routing::{get, patch, post},
};

pub struct ProductDescriptor {
    pub state: ProductAppState,
}

impl ProductDescriptor {
    pub fn new(state: ProductAppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for ProductDescriptor {
    fn entity_type(&self) -> &str {
        "product"
    }

    fn plural(&self) -> &str {
        "products"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/products", get(list_products))
            .route("/products/{id}", get(get_product))
            .with_state(self.state.clone())
    }

    fn build_admin_routes(&self) -> Router {
        Router::new()
            .route("/products", post(create_product))
            .route("/products/{id}", patch(update_product).delete(delete_product))
            .with_state(self.state.clone())
    }
}
