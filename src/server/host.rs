//! Server host holding the shared application state
//!
//! The host owns the storage collections, the external collaborators (image
//! host, auth provider) and the services built on top of them. Entity
//! descriptors read their handler state from it, and the REST exposure turns
//! it into a router.

use crate::commerce::{
    CartService, CartStorage, OrderService, PromoCodeValidator, WishlistService, WishlistStorage,
};
use crate::config::CatalogConfig;
use crate::core::AuthProvider;
use crate::entities::order::DeliveryWindow;
use crate::media::ImageHost;
use crate::server::entity_registry::EntityRegistry;
use crate::storage::Collections;
use std::sync::Arc;

pub type SharedCartService = Arc<CartService<Arc<dyn CartStorage>>>;
pub type SharedWishlistService = Arc<WishlistService<Arc<dyn WishlistStorage>>>;

/// Host context containing all application state
///
/// # Example
///
/// ```rust,ignore
/// let host = Arc::new(ServerBuilder::new().build_host()?);
/// let app = RestExposure::build_router(host, vec![])?;
/// ```
pub struct ServerHost {
    /// One data service per collection
    pub collections: Collections,

    /// Where product, category and receipt images are hosted
    pub images: Arc<dyn ImageHost>,

    /// Resolves callers for the admin guard
    pub auth: Arc<dyn AuthProvider>,

    /// Checkout and the admin order lifecycle
    pub orders: OrderService,

    pub promos: PromoCodeValidator,

    pub carts: SharedCartService,

    pub wishlists: SharedWishlistService,

    pub catalog: CatalogConfig,

    /// Entity registry for public and admin routes
    pub entity_registry: EntityRegistry,
}

impl ServerHost {
    /// Build the host from builder components
    ///
    /// Services are wired from the collections, then every entity descriptor
    /// is registered against the finished state.
    pub fn from_builder_components(
        collections: Collections,
        images: Arc<dyn ImageHost>,
        auth: Arc<dyn AuthProvider>,
        carts: Arc<dyn CartStorage>,
        wishlists: Arc<dyn WishlistStorage>,
        catalog: CatalogConfig,
    ) -> Self {
        let promos = PromoCodeValidator::new(collections.promo_codes.clone());
        let orders = OrderService::new(collections.orders.clone(), promos.clone(), images.clone())
            .with_delivery_window(DeliveryWindow {
                standard_days: catalog.standard_delivery_days,
                express_days: catalog.express_delivery_days,
            });

        let mut host = Self {
            collections,
            images,
            auth,
            orders,
            promos,
            carts: Arc::new(CartService::new(carts)),
            wishlists: Arc::new(WishlistService::new(wishlists)),
            catalog,
            entity_registry: EntityRegistry::new(),
        };

        let mut entity_registry = EntityRegistry::new();
        crate::entities::register_entities(&mut entity_registry, &host);
        host.entity_registry = entity_registry;
        host
    }

    /// Get entity types registered in the host
    pub fn entity_types(&self) -> Vec<&str> {
        self.entity_registry.entity_types()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commerce::{InMemoryCartStorage, InMemoryWishlistStorage};
    use crate::core::NoAuthProvider;
    use crate::media::InMemoryImageHost;

    fn host_with(catalog: CatalogConfig) -> ServerHost {
        ServerHost::from_builder_components(
            Collections::in_memory(),
            Arc::new(InMemoryImageHost::new()),
            Arc::new(NoAuthProvider),
            Arc::new(InMemoryCartStorage::new()),
            Arc::new(InMemoryWishlistStorage::new()),
            catalog,
        )
    }

    #[test]
    fn test_registers_every_entity() {
        let host = host_with(CatalogConfig::default());
        let mut types = host.entity_types();
        types.sort();
        assert_eq!(
            types,
            vec![
                "category",
                "order",
                "product",
                "product_type",
                "promo_code",
                "review",
                "site_status"
            ]
        );
    }

    #[tokio::test]
    async fn test_delivery_window_comes_from_catalog_config() {
        let host = host_with(CatalogConfig {
            standard_delivery_days: 7,
            ..CatalogConfig::default()
        });

        let input = serde_json::from_value(serde_json::json!({
            "customer": {
                "firstName": "Bilal", "lastName": "Ahmed", "email": "bilal@example.com",
                "phone": "03110000000", "fullAddress": "House 4, Karachi"
            },
            "items": [{ "id": "p1", "name": "Shawl", "price": 1500, "quantity": 1 }],
            "payment": { "method": "cod", "subtotal": 1500 },
            "shipping": {
                "method": "standard",
                "address": { "street": "House 4", "city": "Karachi", "zipCode": "74000", "country": "Pakistan" }
            }
        }))
        .unwrap();

        let order = host.orders.place_order(input).await.unwrap();
        assert_eq!(
            order.estimated_delivery_date - order.order_date,
            chrono::Duration::days(7)
        );
    }
}
