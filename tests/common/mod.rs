//! Shared setup for the HTTP integration tests
//!
//! Every test gets its own in-memory storefront. The collections and the image
//! host are kept so tests can seed data and inspect side effects directly.

#![allow(dead_code)]

use axum_test::TestServer;
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use storefront::config::CatalogConfig;
use storefront::core::{DataService, JwtAuthProvider};
use storefront::entities::category::Category;
use storefront::entities::product::{Gender, Product};
use storefront::entities::product_type::ProductType;
use storefront::media::InMemoryImageHost;
use storefront::server::ServerBuilder;
use storefront::storage::Collections;
use uuid::Uuid;

pub const SECRET: &str = "integration-secret";

/// A tiny valid PNG payload for image uploads
pub const PNG_DATA_URI: &str = "data:image/png;base64,aGVsbG8=";

pub struct TestApp {
    pub server: TestServer,
    pub collections: Collections,
    pub images: InMemoryImageHost,
}

pub fn spawn_app() -> TestApp {
    spawn_app_with(CatalogConfig::default())
}

pub fn spawn_app_with(catalog: CatalogConfig) -> TestApp {
    let collections = Collections::in_memory();
    let images = InMemoryImageHost::new();

    let app = ServerBuilder::new()
        .with_collections(collections.clone())
        .with_image_host(images.clone())
        .with_auth_provider(JwtAuthProvider::new(SECRET))
        .with_catalog_config(catalog)
        .build()
        .expect("Failed to build storefront");

    TestApp {
        server: TestServer::try_new(app).expect("Failed to create test server"),
        collections,
        images,
    }
}

fn sign(claims: Value, secret: &str) -> String {
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

fn expires_in(seconds: i64) -> i64 {
    Utc::now().timestamp() + seconds
}

pub fn admin_token() -> String {
    sign(
        json!({ "sub": "admin-1", "role": "admin", "exp": expires_in(3600) }),
        SECRET,
    )
}

pub fn customer_token() -> String {
    sign(
        json!({ "sub": "customer-1", "role": "customer", "exp": expires_in(3600) }),
        SECRET,
    )
}

pub fn expired_admin_token() -> String {
    sign(
        json!({ "sub": "admin-1", "role": "admin", "exp": expires_in(-3600) }),
        SECRET,
    )
}

pub fn foreign_admin_token() -> String {
    sign(
        json!({ "sub": "admin-1", "isAdmin": true, "exp": expires_in(3600) }),
        "some-other-secret",
    )
}

/// A cash-on-delivery checkout body for one item
pub fn order_payload(subtotal: f64, shipping: f64) -> Value {
    json!({
        "customer": {
            "firstName": "Ayesha",
            "lastName": "Khan",
            "email": "ayesha@example.com",
            "phone": "+92 300 1234567",
            "fullAddress": "12 Canal Road, Lahore"
        },
        "items": [
            { "id": "prod-1", "name": "Linen Kurta", "price": subtotal, "quantity": 1, "size": "M" }
        ],
        "payment": {
            "method": "cod",
            "subtotal": subtotal,
            "shipping": shipping
        },
        "shipping": {
            "method": "standard",
            "address": {
                "street": "12 Canal Road",
                "city": "Lahore",
                "zipCode": "54000",
                "country": "Pakistan"
            }
        }
    })
}

/// Place an order through the public endpoint and return the stored document
pub async fn place_order(app: &TestApp, body: Value) -> Value {
    let response = app.server.post("/api/orders").json(&body).await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

pub async fn create_promo(app: &TestApp, code: &str, discount: f64, min_order: f64) -> Value {
    let response = app
        .server
        .post("/api/admin/promo-codes")
        .authorization_bearer(admin_token())
        .json(&json!({
            "code": code,
            "discountPercentage": discount,
            "minOrderAmount": min_order
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

/// Seed one category and one product type directly into storage
pub async fn seed_catalog(app: &TestApp) -> (Category, ProductType) {
    let category = app
        .collections
        .categories
        .create(Category::new("Clothing"))
        .await
        .unwrap();
    let product_type = app
        .collections
        .product_types
        .create(ProductType::new("Kurta", Some(category.id)))
        .await
        .unwrap();
    (category, product_type)
}

/// Seed a product directly into storage
pub async fn seed_product(
    app: &TestApp,
    category: &Category,
    product_type: &ProductType,
    name: &str,
    price: f64,
    stock: u32,
) -> Product {
    let now = Utc::now();
    let product = Product {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: format!("{} description", name),
        price,
        original_price: None,
        category: category.id,
        product_type: product_type.id,
        sizes: vec!["S".to_string(), "M".to_string()],
        colors: vec!["white".to_string()],
        gender: Gender::Women,
        images: Vec::new(),
        stock,
        is_active: true,
        product_tags: Vec::new(),
        created_at: now,
        updated_at: now,
    };
    app.collections.products.create(product).await.unwrap()
}
