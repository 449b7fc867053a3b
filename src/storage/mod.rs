//! Storage implementations for different backends

pub mod in_memory;
#[cfg(feature = "mongodb_backend")]
pub mod mongodb;

pub use in_memory::InMemoryDataService;
#[cfg(feature = "mongodb_backend")]
pub use mongodb::MongoDataService;

use crate::core::DataService;
use crate::entities::category::Category;
use crate::entities::order::Order;
use crate::entities::product::Product;
use crate::entities::product_type::ProductType;
use crate::entities::promo_code::PromoCode;
use crate::entities::review::Review;
use crate::entities::site_status::SiteStatus;
use std::sync::Arc;

/// One service per collection, shared by every handler
#[derive(Clone)]
pub struct Collections {
    pub orders: Arc<dyn DataService<Order>>,
    pub promo_codes: Arc<dyn DataService<PromoCode>>,
    pub products: Arc<dyn DataService<Product>>,
    pub categories: Arc<dyn DataService<Category>>,
    pub product_types: Arc<dyn DataService<ProductType>>,
    pub reviews: Arc<dyn DataService<Review>>,
    pub site_status: Arc<dyn DataService<SiteStatus>>,
}

impl Collections {
    /// Process-local collections; contents are lost on restart
    pub fn in_memory() -> Self {
        Self {
            orders: Arc::new(InMemoryDataService::<Order>::new()),
            promo_codes: Arc::new(InMemoryDataService::<PromoCode>::new()),
            products: Arc::new(InMemoryDataService::<Product>::new()),
            categories: Arc::new(InMemoryDataService::<Category>::new()),
            product_types: Arc::new(InMemoryDataService::<ProductType>::new()),
            reviews: Arc::new(InMemoryDataService::<Review>::new()),
            site_status: Arc::new(InMemoryDataService::<SiteStatus>::new()),
        }
    }

    /// MongoDB collections, creating unique indexes first
    #[cfg(feature = "mongodb_backend")]
    pub async fn mongodb(database: ::mongodb::Database) -> anyhow::Result<Self> {
        let orders = MongoDataService::<Order>::new(database.clone());
        let promo_codes = MongoDataService::<PromoCode>::new(database.clone());
        let categories = MongoDataService::<Category>::new(database.clone());
        let product_types = MongoDataService::<ProductType>::new(database.clone());

        orders.ensure_indexes().await?;
        promo_codes.ensure_indexes().await?;
        categories.ensure_indexes().await?;
        product_types.ensure_indexes().await?;

        Ok(Self {
            orders: Arc::new(orders),
            promo_codes: Arc::new(promo_codes),
            products: Arc::new(MongoDataService::<Product>::new(database.clone())),
            categories: Arc::new(categories),
            product_types: Arc::new(product_types),
            reviews: Arc::new(MongoDataService::<Review>::new(database.clone())),
            site_status: Arc::new(MongoDataService::<SiteStatus>::new(database)),
        })
    }
}
