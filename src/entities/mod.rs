//! Entities module - documents stored by the storefront and their HTTP surface
//!
//! Each entity folder holds its `model` (document, input payloads, queries),
//! its `handlers` and the `descriptor` that mounts them.

pub mod category;
pub mod order;
pub mod product;
pub mod product_type;
pub mod promo_code;
pub mod review;
pub mod site_status;

pub use category::Category;
pub use order::Order;
pub use product::Product;
pub use product_type::ProductType;
pub use promo_code::PromoCode;
pub use review::Review;
pub use site_status::SiteStatus;

use crate::server::entity_registry::EntityRegistry;
use crate::server::host::ServerHost;

/// Register the descriptor of every entity, with handler state taken from the host
pub fn register_entities(registry: &mut EntityRegistry, host: &ServerHost) {
    let collections = &host.collections;

    registry.register(Box::new(order::OrderDescriptor::new(order::OrderAppState {
        service: host.orders.clone(),
        products: collections.products.clone(),
        low_stock_threshold: host.catalog.low_stock_threshold,
    })));

    registry.register(Box::new(promo_code::PromoCodeDescriptor::new(
        promo_code::PromoCodeAppState {
            store: collections.promo_codes.clone(),
            validator: host.promos.clone(),
        },
    )));

    registry.register(Box::new(product::ProductDescriptor::new(
        product::ProductAppState {
            store: collections.products.clone(),
            categories: collections.categories.clone(),
            product_types: collections.product_types.clone(),
            reviews: collections.reviews.clone(),
            images: host.images.clone(),
        },
    )));

    registry.register(Box::new(category::CategoryDescriptor::new(
        category::CategoryAppState {
            store: collections.categories.clone(),
            products: collections.products.clone(),
            product_types: collections.product_types.clone(),
            images: host.images.clone(),
        },
    )));

    registry.register(Box::new(product_type::ProductTypeDescriptor::new(
        product_type::ProductTypeAppState {
            store: collections.product_types.clone(),
            products: collections.products.clone(),
            categories: collections.categories.clone(),
        },
    )));

    registry.register(Box::new(review::ReviewDescriptor::new(
        review::ReviewAppState {
            store: collections.reviews.clone(),
            products: collections.products.clone(),
        },
    )));

    registry.register(Box::new(site_status::SiteStatusDescriptor::new(
        site_status::SiteStatusAppState {
            store: collections.site_status.clone(),
        },
    )));
}
