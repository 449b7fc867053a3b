//! Products, categories and product types over HTTP

mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::{Value, json};
use storefront::core::DataService;
use storefront::entities::review::Review;
use uuid::Uuid;

fn product_body(category: Uuid, product_type: Uuid) -> Value {
    json!({
        "name": "  Embroidered Kurta  ",
        "description": "Hand embroidered cotton kurta",
        "price": 2999.999,
        "originalPrice": 4000.0,
        "category": category,
        "type": product_type,
        "sizes": ["S", "M", "L"],
        "colors": ["ivory"],
        "gender": "women",
        "images": [PNG_DATA_URI],
        "stock": 12,
        "productTags": ["new-arrival", "featured"]
    })
}

// =============================================================================
// Products
// =============================================================================

mod product_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_product_uploads_images_and_populates_refs() {
        let app = spawn_app();
        let (category, product_type) = seed_catalog(&app).await;

        let response = app
            .server
            .post("/api/admin/products")
            .authorization_bearer(admin_token())
            .json(&product_body(category.id, product_type.id))
            .await;

        response.assert_status(StatusCode::CREATED);
        let product = response.json::<Value>();
        assert_eq!(product["name"], "Embroidered Kurta");
        assert_eq!(product["price"], 3000.0);
        assert_eq!(product["category"]["name"], "Clothing");
        assert_eq!(product["type"]["name"], "Kurta");
        assert_eq!(product["discountPercentage"], 25);
        assert_eq!(product["reviewCount"], 0);
        assert_eq!(product["isActive"], true);

        let public_id = product["images"][0]["publicId"].as_str().unwrap();
        assert!(public_id.starts_with("products/"));
        assert!(app.images.contains(public_id).await);
    }

    #[tokio::test]
    async fn test_create_product_with_unknown_category() {
        let app = spawn_app();
        let (_, product_type) = seed_catalog(&app).await;

        let response = app
            .server
            .post("/api/admin/products")
            .authorization_bearer(admin_token())
            .json(&product_body(Uuid::new_v4(), product_type.id))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(app.images.stored_count().await, 0);
    }

    #[tokio::test]
    async fn test_create_product_rejects_unknown_fields() {
        let app = spawn_app();
        let (category, product_type) = seed_catalog(&app).await;
        let mut body = product_body(category.id, product_type.id);
        body["rating"] = json!(5);

        app.server
            .post("/api/admin/products")
            .authorization_bearer(admin_token())
            .json(&body)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_public_listing_filters_and_sorts() {
        let app = spawn_app();
        let (category, product_type) = seed_catalog(&app).await;
        seed_product(&app, &category, &product_type, "Cotton Kurta", 2500.0, 10).await;
        seed_product(&app, &category, &product_type, "Silk Kurta", 8000.0, 0).await;
        seed_product(&app, &category, &product_type, "Lawn Shirt", 1800.0, 3).await;

        let cheapest_first = app
            .server
            .get("/api/products")
            .add_query_param("sort", "price:asc")
            .await
            .json::<Value>();
        let names: Vec<&str> = cheapest_first["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Lawn Shirt", "Cotton Kurta", "Silk Kurta"]);

        let kurtas = app
            .server
            .get("/api/products")
            .add_query_param("search", "kurta")
            .add_query_param("inStock", "true")
            .await
            .json::<Value>();
        assert_eq!(kurtas["pagination"]["total"], 1);
        assert_eq!(kurtas["data"][0]["name"], "Cotton Kurta");

        let paged = app
            .server
            .get("/api/products")
            .add_query_param("limit", "2")
            .add_query_param("page", "2")
            .await
            .json::<Value>();
        assert_eq!(paged["data"].as_array().unwrap().len(), 1);
        assert_eq!(paged["pagination"]["totalPages"], 2);
        assert_eq!(paged["pagination"]["hasPrev"], true);
        assert_eq!(paged["pagination"]["hasNext"], false);

        let far_away = app
            .server
            .get("/api/products")
            .add_query_param("limit", "100")
            .add_query_param("page", usize::MAX.to_string())
            .await;
        far_away.assert_status_ok();
        assert_eq!(far_away.json::<Value>()["data"], serde_json::json!([]));

        app.server
            .get("/api/products")
            .add_query_param("sort", "popularity")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_inactive_products_hidden() {
        let app = spawn_app();
        let (category, product_type) = seed_catalog(&app).await;
        let mut product = seed_product(&app, &category, &product_type, "Hidden", 100.0, 1).await;
        product.is_active = false;
        app.collections
            .products
            .update(&product.id, product.clone())
            .await
            .unwrap();

        let listing = app.server.get("/api/products").await.json::<Value>();
        assert_eq!(listing["pagination"]["total"], 0);

        app.server
            .get(&format!("/api/products/{}", product.id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_product_replaces_images() {
        let app = spawn_app();
        let (category, product_type) = seed_catalog(&app).await;
        let created = app
            .server
            .post("/api/admin/products")
            .authorization_bearer(admin_token())
            .json(&product_body(category.id, product_type.id))
            .await
            .json::<Value>();
        let id = created["id"].as_str().unwrap();
        let old_image = created["images"][0]["publicId"].as_str().unwrap().to_string();

        let response = app
            .server
            .patch(&format!("/api/admin/products/{}", id))
            .authorization_bearer(admin_token())
            .json(&json!({ "images": [PNG_DATA_URI], "stock": 0, "originalPrice": null }))
            .await;

        response.assert_status_ok();
        let updated = response.json::<Value>();
        assert_eq!(updated["stock"], 0);
        assert_eq!(updated["discountPercentage"], 0);
        assert_ne!(updated["images"][0]["publicId"], old_image.as_str());
        assert!(app.images.destroyed().await.contains(&old_image));
    }

    #[tokio::test]
    async fn test_update_product_keeps_hosted_images() {
        let app = spawn_app();
        let (category, product_type) = seed_catalog(&app).await;
        let created = app
            .server
            .post("/api/admin/products")
            .authorization_bearer(admin_token())
            .json(&product_body(category.id, product_type.id))
            .await
            .json::<Value>();
        let id = created["id"].as_str().unwrap();

        app.server
            .patch(&format!("/api/admin/products/{}", id))
            .authorization_bearer(admin_token())
            .json(&json!({ "images": created["images"], "name": "Renamed" }))
            .await
            .assert_status_ok();

        assert!(app.images.destroyed().await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_product_cleans_up() {
        let app = spawn_app();
        let (category, product_type) = seed_catalog(&app).await;
        let created = app
            .server
            .post("/api/admin/products")
            .authorization_bearer(admin_token())
            .json(&product_body(category.id, product_type.id))
            .await
            .json::<Value>();
        let id: Uuid = created["id"].as_str().unwrap().parse().unwrap();
        let image = created["images"][0]["publicId"].as_str().unwrap().to_string();

        app.server
            .post(&format!("/api/products/{}/reviews", id))
            .json(&json!({ "name": "Sara", "rating": 5, "comment": "Lovely" }))
            .await
            .assert_status(StatusCode::CREATED);

        app.server
            .delete(&format!("/api/admin/products/{}", id))
            .authorization_bearer(admin_token())
            .await
            .assert_status(StatusCode::NO_CONTENT);

        assert!(app.images.destroyed().await.contains(&image));
        let reviews: Vec<Review> = app.collections.reviews.list().await.unwrap();
        assert!(reviews.is_empty());

        app.server
            .delete(&format!("/api/admin/products/{}", id))
            .authorization_bearer(admin_token())
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}

// =============================================================================
// Categories
// =============================================================================

mod category_tests {
    use super::*;

    async fn create_category(app: &TestApp, body: Value) -> axum_test::TestResponse {
        app.server
            .post("/api/admin/categories")
            .authorization_bearer(admin_token())
            .json(&body)
            .await
    }

    #[tokio::test]
    async fn test_create_and_list_categories() {
        let app = spawn_app();

        let response = create_category(
            &app,
            json!({ "name": "Women Wear", "image": PNG_DATA_URI }),
        )
        .await;
        response.assert_status(StatusCode::CREATED);
        let category = response.json::<Value>();
        assert_eq!(category["slug"], "women-wear");
        assert!(
            category["image"]["publicId"]
                .as_str()
                .unwrap()
                .starts_with("categories/")
        );

        create_category(&app, json!({ "name": "Accessories" }))
            .await
            .assert_status(StatusCode::CREATED);
        create_category(&app, json!({ "name": "Archive", "isActive": false }))
            .await
            .assert_status(StatusCode::CREATED);

        let listing = app.server.get("/api/categories").await.json::<Value>();
        let slugs: Vec<&str> = listing
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["slug"].as_str().unwrap())
            .collect();
        assert_eq!(slugs, vec!["accessories", "women-wear"]);
    }

    #[tokio::test]
    async fn test_category_names_unique_ignoring_case() {
        let app = spawn_app();
        create_category(&app, json!({ "name": "Shoes" }))
            .await
            .assert_status(StatusCode::CREATED);

        create_category(&app, json!({ "name": "SHOES" }))
            .await
            .assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_update_category_replaces_image() {
        let app = spawn_app();
        let category = create_category(&app, json!({ "name": "Bags", "image": PNG_DATA_URI }))
            .await
            .json::<Value>();
        let id = category["id"].as_str().unwrap();
        let old_image = category["image"]["publicId"].as_str().unwrap().to_string();

        let response = app
            .server
            .patch(&format!("/api/admin/categories/{}", id))
            .authorization_bearer(admin_token())
            .json(&json!({ "name": "Hand Bags", "image": PNG_DATA_URI }))
            .await;

        response.assert_status_ok();
        let updated = response.json::<Value>();
        assert_eq!(updated["slug"], "hand-bags");
        assert!(app.images.destroyed().await.contains(&old_image));
    }

    #[tokio::test]
    async fn test_delete_category_in_use() {
        let app = spawn_app();
        let (category, product_type) = seed_catalog(&app).await;
        seed_product(&app, &category, &product_type, "Kurta", 100.0, 1).await;

        let response = app
            .server
            .delete(&format!("/api/admin/categories/{}", category.id))
            .authorization_bearer(admin_token())
            .await;

        response.assert_status(StatusCode::CONFLICT);
        assert_eq!(response.json::<Value>()["code"], "ENTITY_IN_USE");
    }

    #[tokio::test]
    async fn test_delete_unused_category() {
        let app = spawn_app();
        let category = create_category(&app, json!({ "name": "Temporary" }))
            .await
            .json::<Value>();
        let id = category["id"].as_str().unwrap();

        app.server
            .delete(&format!("/api/admin/categories/{}", id))
            .authorization_bearer(admin_token())
            .await
            .assert_status(StatusCode::NO_CONTENT);

        app.server
            .get(&format!("/api/categories/{}", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}

// =============================================================================
// Product types
// =============================================================================

mod product_type_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_filter_types() {
        let app = spawn_app();
        let (category, _) = seed_catalog(&app).await;

        let response = app
            .server
            .post("/api/admin/types")
            .authorization_bearer(admin_token())
            .json(&json!({ "name": "Dupatta", "category": category.id }))
            .await;
        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.json::<Value>()["slug"], "dupatta");

        app.server
            .post("/api/admin/types")
            .authorization_bearer(admin_token())
            .json(&json!({ "name": "Gift Card" }))
            .await
            .assert_status(StatusCode::CREATED);

        let all = app.server.get("/api/types").await.json::<Value>();
        assert_eq!(all.as_array().unwrap().len(), 3);

        let in_category = app
            .server
            .get("/api/types")
            .add_query_param("category", category.id.to_string())
            .await
            .json::<Value>();
        assert_eq!(in_category.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_type_with_unknown_category() {
        let app = spawn_app();
        app.server
            .post("/api/admin/types")
            .authorization_bearer(admin_token())
            .json(&json!({ "name": "Orphan", "category": Uuid::new_v4() }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_type_in_use() {
        let app = spawn_app();
        let (category, product_type) = seed_catalog(&app).await;
        seed_product(&app, &category, &product_type, "Kurta", 100.0, 1).await;

        app.server
            .delete(&format!("/api/admin/types/{}", product_type.id))
            .authorization_bearer(admin_token())
            .await
            .assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_rename_type() {
        let app = spawn_app();
        let (_, product_type) = seed_catalog(&app).await;

        let response = app
            .server
            .patch(&format!("/api/admin/types/{}", product_type.id))
            .authorization_bearer(admin_token())
            .json(&json!({ "name": "Long Kurta" }))
            .await;

        response.assert_status_ok();
        let updated = response.json::<Value>();
        assert_eq!(updated["name"], "Long Kurta");
        assert_eq!(updated["slug"], "long-kurta");
    }
}
