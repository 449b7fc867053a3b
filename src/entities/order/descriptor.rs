//! Entity descriptor for Order

use super::handlers::{
    OrderAppState, create_order, dashboard_stats, delete_order, delete_receipt, get_order,
    list_orders, track_order, update_order_status,
};
use crate::server::entity_registry::EntityDescriptor;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Descriptor for the Order entity
pub struct OrderDescriptor {
    pub state: OrderAppState,
}

impl OrderDescriptor {
    pub fn new(state: OrderAppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for OrderDescriptor {
    fn entity_type(&self) -> &str {
        "order"
    }

    fn plural(&self) -> &str {
        "orders"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/orders", post(create_order))
            .route("/orders/{order_id}", get(track_order))
            .with_state(self.state.clone())
    }

    fn build_admin_routes(&self) -> Router {
        Router::new()
            .route("/orders", get(list_orders))
            .route(
                "/orders/{id}",
                get(get_order)
                    .patch(update_order_status)
                    .delete(delete_order),
            )
            .route("/orders/{id}/receipt", delete(delete_receipt))
            .route("/stats", get(dashboard_stats))
            .with_state(self.state.clone())
    }
}
