//! Entity descriptor for PromoCode

use super::handlers::{
    PromoCodeAppState, create_promo_code, delete_promo_code, list_promo_codes, validate_promo_code,
};
use crate::server::entity_registry::EntityDescriptor;
use axum::{
    Router,
    routing::{delete, get, post},
};

pub struct PromoCodeDescriptor {
    pub state: PromoCodeAppState,
}

impl PromoCodeDescriptor {
    pub fn new(state: PromoCodeAppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for PromoCodeDescriptor {
    fn entity_type(&self) -> &str {
        "promo_code"
    }

    fn plural(&self) -> &str {
        "promo-codes"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/promo-codes/validate", post(validate_promo_code))
            .with_state(self.state.clone())
    }

    fn build_admin_routes(&self) -> Router {
        Router::new()
            .route("/promo-codes", get(list_promo_codes).post(create_promo_code))
            .route("/promo-codes/{id}", delete(delete_promo_code))
            .with_state(self.state.clone())
    }
}
