//! Macro-generated test suite for `DataService<PromoCode>` contract validation.
//!
//! The `data_service_tests!` macro generates a test module that validates any
//! `DataService<PromoCode>` implementation against the contract the handlers
//! rely on: CRUD, newest-first listing, equality search and unique keys.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use storefront::storage::InMemoryDataService;
//!
//! data_service_tests!(InMemoryDataService::<PromoCode>::new());
//! ```
//!
//! # Generated Tests
//!
//! ## CRUD
//! - `test_create_and_get`
//! - `test_get_nonexistent`
//! - `test_list_empty`
//! - `test_list_newest_first`
//! - `test_update_existing`
//! - `test_update_nonexistent`
//! - `test_delete_returns_document`
//! - `test_delete_nonexistent`
//!
//! ## Search
//! - `test_search_string_field`
//! - `test_search_boolean_field`
//! - `test_search_no_results`
//! - `test_search_unknown_field`
//! - `test_find_one`
//!
//! ## Unique keys
//! - `test_create_duplicate_id`
//! - `test_create_duplicate_unique_field`
//! - `test_update_into_duplicate_unique_field`
//!
//! ## Concurrency
//! - `test_concurrent_access`

/// Generate a full `DataService<PromoCode>` conformance test suite.
///
/// `$factory` must evaluate to a fresh, empty service. It is re-evaluated for
/// each test. For the concurrent access test the service must also be
/// `Clone + 'static` (shared state behind an `Arc`).
#[macro_export]
macro_rules! data_service_tests {
    ($factory:expr) => {
        mod data_service_contract_tests {
            use super::*;
            use storefront::core::error::StorageError;
            use storefront::core::{DataService, Entity};
            use uuid::Uuid;

            fn is_duplicate_key(err: &anyhow::Error) -> bool {
                matches!(
                    err.downcast_ref::<StorageError>(),
                    Some(StorageError::DuplicateKey { .. })
                )
            }

            // ==================================================================
            // CRUD
            // ==================================================================

            #[tokio::test]
            async fn test_create_and_get() {
                let service = $factory;
                let promo = create_test_promo("welcome", 15.0, true);
                let id = promo.id;

                let created = service.create(promo).await.unwrap();
                assert_eq!(created.id(), id);
                assert_eq!(created.code, "WELCOME");

                let retrieved = service.get(&id).await.unwrap();
                assert!(retrieved.is_some(), "Document should exist after create");
                let retrieved = retrieved.unwrap();
                assert_eq!(retrieved.id, id);
                assert_eq!(retrieved.code, "WELCOME");
                assert_eq!(retrieved.discount_percentage, 15.0);
                assert!(retrieved.is_active);
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let service = $factory;
                let result = service.get(&Uuid::new_v4()).await.unwrap();
                assert!(result.is_none());
            }

            #[tokio::test]
            async fn test_list_empty() {
                let service = $factory;
                let all = service.list().await.unwrap();
                assert!(all.is_empty(), "List on empty collection should be empty");
                assert_eq!(service.count().await.unwrap(), 0);
            }

            #[tokio::test]
            async fn test_list_newest_first() {
                let service = $factory;
                for promo in sample_batch(4) {
                    service.create(promo).await.unwrap();
                }

                let all = service.list().await.unwrap();
                assert_count(&all, 4);
                let codes: Vec<&str> = all.iter().map(|p| p.code.as_str()).collect();
                assert_eq!(codes, vec!["CODE3", "CODE2", "CODE1", "CODE0"]);
                assert_eq!(service.count().await.unwrap(), 4);
            }

            #[tokio::test]
            async fn test_update_existing() {
                let service = $factory;
                let promo = service
                    .create(create_test_promo("SPRING", 10.0, true))
                    .await
                    .unwrap();

                let mut changed = promo.clone();
                changed.is_active = false;
                changed.discount_percentage = 20.0;
                changed.touch();
                service.update(&promo.id, changed).await.unwrap();

                let stored = service.get(&promo.id).await.unwrap().unwrap();
                assert!(!stored.is_active);
                assert_eq!(stored.discount_percentage, 20.0);
                assert!(stored.updated_at >= promo.updated_at);
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let service = $factory;
                let promo = create_test_promo("GHOST", 10.0, true);
                let result = service.update(&promo.id, promo.clone()).await;
                assert!(result.is_err(), "Updating a missing document should fail");
            }

            #[tokio::test]
            async fn test_delete_returns_document() {
                let service = $factory;
                let promo = service
                    .create(create_test_promo("BYE", 10.0, true))
                    .await
                    .unwrap();

                let removed = service.delete(&promo.id).await.unwrap();
                assert_eq!(removed.map(|p| p.code), Some("BYE".to_string()));
                assert!(service.get(&promo.id).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let service = $factory;
                let removed = service.delete(&Uuid::new_v4()).await.unwrap();
                assert!(removed.is_none());
            }

            // ==================================================================
            // Search
            // ==================================================================

            #[tokio::test]
            async fn test_search_string_field() {
                let service = $factory;
                for promo in sample_batch(3) {
                    service.create(promo).await.unwrap();
                }

                let found = service.search("code", "CODE1").await.unwrap();
                assert_count(&found, 1);
                assert_eq!(found[0].code, "CODE1");
            }

            #[tokio::test]
            async fn test_search_boolean_field() {
                let service = $factory;
                for promo in sample_batch(5) {
                    service.create(promo).await.unwrap();
                }

                let active = service.search("isActive", "true").await.unwrap();
                assert_count(&active, 3);
                assert!(active.iter().all(|p| p.is_active));

                let inactive = service.search("isActive", "false").await.unwrap();
                assert_count(&inactive, 2);
                assert!(inactive.iter().all(|p| !p.is_active));
            }

            #[tokio::test]
            async fn test_search_no_results() {
                let service = $factory;
                service
                    .create(create_test_promo("REAL", 10.0, true))
                    .await
                    .unwrap();

                let found = service.search("code", "FAKE").await.unwrap();
                assert!(found.is_empty());
            }

            #[tokio::test]
            async fn test_search_unknown_field() {
                let service = $factory;
                service
                    .create(create_test_promo("REAL", 10.0, true))
                    .await
                    .unwrap();

                let found = service.search("nonexistent_field", "anything").await.unwrap();
                assert!(found.is_empty());
            }

            #[tokio::test]
            async fn test_find_one() {
                let service = $factory;
                let promo = service
                    .create(create_test_promo("ONLY", 10.0, true))
                    .await
                    .unwrap();

                let found = service.find_one("code", "ONLY").await.unwrap();
                assert_eq!(found.map(|p| p.id), Some(promo.id));
                assert!(service.find_one("code", "NONE").await.unwrap().is_none());
            }

            // ==================================================================
            // Unique keys
            // ==================================================================

            #[tokio::test]
            async fn test_create_duplicate_id() {
                let service = $factory;
                let promo = create_test_promo("FIRST", 10.0, true);
                service.create(promo.clone()).await.unwrap();

                let mut again = promo.clone();
                again.code = "SECOND".to_string();
                let err = service.create(again).await.unwrap_err();
                assert!(is_duplicate_key(&err), "unexpected error: {}", err);
            }

            #[tokio::test]
            async fn test_create_duplicate_unique_field() {
                let service = $factory;
                service
                    .create(create_test_promo("SAVE10", 10.0, true))
                    .await
                    .unwrap();

                let err = service
                    .create(create_test_promo("save10", 25.0, true))
                    .await
                    .unwrap_err();
                assert!(is_duplicate_key(&err), "unexpected error: {}", err);
                assert_eq!(service.count().await.unwrap(), 1);
            }

            #[tokio::test]
            async fn test_update_into_duplicate_unique_field() {
                let service = $factory;
                service
                    .create(create_test_promo("TAKEN", 10.0, true))
                    .await
                    .unwrap();
                let other = service
                    .create(create_test_promo("FREE", 10.0, true))
                    .await
                    .unwrap();

                let mut clash = other.clone();
                clash.code = "TAKEN".to_string();
                let err = service.update(&other.id, clash).await.unwrap_err();
                assert!(is_duplicate_key(&err), "unexpected error: {}", err);

                let stored = service.get(&other.id).await.unwrap().unwrap();
                assert_eq!(stored.code, "FREE");
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_access() {
                let service = $factory;
                let mut handles = Vec::new();

                for i in 0..10 {
                    let service = service.clone();
                    handles.push(tokio::spawn(async move {
                        service
                            .create(create_test_promo(&format!("PAR{}", i), 10.0, true))
                            .await
                            .unwrap();
                    }));
                }
                for handle in handles {
                    handle.await.unwrap();
                }

                assert_count(&service.list().await.unwrap(), 10);
            }
        }
    };
}
