//! Entity descriptor for SiteStatus

use super::handlers::{SiteStatusAppState, get_site_status, put_site_status};
use crate::server::entity_registry::EntityDescriptor;
use axum::{
    Router,
    routing::{get, put},
};

pub struct SiteStatusDescriptor {
    pub state: SiteStatusAppState,
}

impl SiteStatusDescriptor {
    pub fn new(state: SiteStatusAppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for SiteStatusDescriptor {
    fn entity_type(&self) -> &str {
        "site_status"
    }

    fn plural(&self) -> &str {
        "site-status"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/site-status", get(get_site_status))
            .with_state(self.state.clone())
    }

    fn build_admin_routes(&self) -> Router {
        Router::new()
            .route("/site-status", put(put_site_status))
            .with_state(self.state.clone())
    }
}
