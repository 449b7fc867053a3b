//! Carts and wishlists over HTTP

mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::{Value, json};
use uuid::Uuid;

fn kurta(size: &str, quantity: u32) -> Value {
    json!({
        "id": "prod-1",
        "name": "Linen Kurta",
        "price": 2500.0,
        "quantity": quantity,
        "size": size,
        "color": "white"
    })
}

mod cart_tests {
    use super::*;

    #[tokio::test]
    async fn test_new_cart_is_empty() {
        let app = spawn_app();

        let cart = app.server.get("/api/carts/session-1").await.json::<Value>();

        assert_eq!(cart["items"], json!([]));
        assert_eq!(cart["itemCount"], 0);
        assert_eq!(cart["subtotal"], 0.0);
    }

    #[tokio::test]
    async fn test_add_merges_identical_lines() {
        let app = spawn_app();

        app.server
            .post("/api/carts/session-1/items")
            .json(&kurta("M", 1))
            .await
            .assert_status_ok();
        app.server
            .post("/api/carts/session-1/items")
            .json(&kurta("M", 2))
            .await
            .assert_status_ok();
        let cart = app
            .server
            .post("/api/carts/session-1/items")
            .json(&kurta("L", 1))
            .await
            .json::<Value>();

        assert_eq!(cart["items"].as_array().unwrap().len(), 2);
        assert_eq!(cart["items"][0]["quantity"], 3);
        assert_eq!(cart["itemCount"], 4);
        assert_eq!(cart["subtotal"], 10000.0);

        // carts are independent of each other
        let other = app.server.get("/api/carts/session-2").await.json::<Value>();
        assert_eq!(other["itemCount"], 0);
    }

    #[tokio::test]
    async fn test_update_and_remove_lines() {
        let app = spawn_app();
        app.server
            .post("/api/carts/session-1/items")
            .json(&kurta("M", 1))
            .await
            .assert_status_ok();
        app.server
            .post("/api/carts/session-1/items")
            .json(&kurta("L", 1))
            .await
            .assert_status_ok();

        let updated = app
            .server
            .patch("/api/carts/session-1/items")
            .json(&json!({ "id": "prod-1", "size": "M", "color": "white", "quantity": 5 }))
            .await
            .json::<Value>();
        assert_eq!(updated["itemCount"], 6);

        let removed = app
            .server
            .delete("/api/carts/session-1/items")
            .add_query_param("id", "prod-1")
            .add_query_param("size", "L")
            .add_query_param("color", "white")
            .await
            .json::<Value>();
        assert_eq!(removed["items"].as_array().unwrap().len(), 1);
        assert_eq!(removed["items"][0]["size"], "M");

        let zeroed = app
            .server
            .patch("/api/carts/session-1/items")
            .json(&json!({ "id": "prod-1", "size": "M", "color": "white", "quantity": 0 }))
            .await
            .json::<Value>();
        assert_eq!(zeroed["itemCount"], 0);
    }

    #[tokio::test]
    async fn test_cart_errors() {
        let app = spawn_app();

        app.server
            .post("/api/carts/session-1/items")
            .json(&kurta("M", 0))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        app.server
            .patch("/api/carts/session-1/items")
            .json(&json!({ "id": "prod-9", "quantity": 2 }))
            .await
            .assert_status(StatusCode::NOT_FOUND);

        app.server
            .post(&format!("/api/carts/{}/items", "x".repeat(129)))
            .json(&kurta("M", 1))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_oversized_quantities_rejected() {
        let app = spawn_app();
        let huge = json!({ "id": "p1", "name": "Shawl", "price": 10.0, "quantity": 4_000_000_000u32 });

        app.server
            .post("/api/carts/c1/items")
            .json(&huge)
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let big = json!({ "id": "p1", "name": "Shawl", "price": 10.0, "quantity": 999 });
        app.server
            .post("/api/carts/c1/items")
            .json(&big)
            .await
            .assert_status_ok();
        app.server
            .post("/api/carts/c1/items")
            .json(&big)
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let cart = app.server.get("/api/carts/c1").await.json::<Value>();
        assert_eq!(cart["itemCount"], 999);
    }

    #[tokio::test]
    async fn test_negative_price_rejected() {
        let app = spawn_app();

        let response = app
            .server
            .post("/api/carts/c1/items")
            .json(&json!({ "id": "p1", "name": "Shawl", "price": -10.0, "quantity": 1 }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["details"]["fields"][0]["field"], "price");
    }

    #[tokio::test]
    async fn test_concurrent_adds_keep_every_line() {
        let app = spawn_app();

        let (first, second) = tokio::join!(
            async { app.server.post("/api/carts/c1/items").json(&kurta("M", 2)).await },
            async { app.server.post("/api/carts/c1/items").json(&kurta("L", 3)).await },
        );
        first.assert_status_ok();
        second.assert_status_ok();

        let cart = app.server.get("/api/carts/c1").await.json::<Value>();
        assert_eq!(cart["items"].as_array().unwrap().len(), 2);
        assert_eq!(cart["itemCount"], 5);
    }

    #[tokio::test]
    async fn test_clear_cart() {
        let app = spawn_app();
        app.server
            .post("/api/carts/session-1/items")
            .json(&kurta("M", 2))
            .await
            .assert_status_ok();

        app.server
            .delete("/api/carts/session-1")
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let cart = app.server.get("/api/carts/session-1").await.json::<Value>();
        assert_eq!(cart["itemCount"], 0);
    }
}

mod wishlist_tests {
    use super::*;

    #[tokio::test]
    async fn test_toggle_adds_then_removes() {
        let app = spawn_app();
        let (category, product_type) = seed_catalog(&app).await;
        let product = seed_product(&app, &category, &product_type, "Kurta", 2500.0, 5).await;

        let added = app
            .server
            .post("/api/wishlists/session-1/toggle")
            .json(&json!({ "productId": product.id }))
            .await
            .json::<Value>();
        assert_eq!(added["wishlisted"], true);
        assert_eq!(added["products"], json!([product.id]));

        let listed = app.server.get("/api/wishlists/session-1").await.json::<Value>();
        assert_eq!(listed["products"], json!([product.id]));

        let removed = app
            .server
            .post("/api/wishlists/session-1/toggle")
            .json(&json!({ "productId": product.id }))
            .await
            .json::<Value>();
        assert_eq!(removed["wishlisted"], false);
        assert_eq!(removed["products"], json!([]));
    }

    #[tokio::test]
    async fn test_unknown_product_not_added() {
        let app = spawn_app();

        app.server
            .post("/api/wishlists/session-1/toggle")
            .json(&json!({ "productId": Uuid::new_v4() }))
            .await
            .assert_status(StatusCode::NOT_FOUND);

        app.server
            .post("/api/wishlists/session-1/toggle")
            .json(&json!({ "product": Uuid::new_v4() }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_clear_wishlist() {
        let app = spawn_app();
        let (category, product_type) = seed_catalog(&app).await;
        let product = seed_product(&app, &category, &product_type, "Kurta", 2500.0, 5).await;
        app.server
            .post("/api/wishlists/session-1/toggle")
            .json(&json!({ "productId": product.id }))
            .await
            .assert_status_ok();

        app.server
            .delete("/api/wishlists/session-1")
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let listed = app.server.get("/api/wishlists/session-1").await.json::<Value>();
        assert_eq!(listed["products"], json!([]));
    }
}
