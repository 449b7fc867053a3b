//! ProductType HTTP handlers

use super::model::{CreateProductType, ProductType, UpdateProductType};
use crate::core::error::EntityError;
use crate::core::validation::Validated;
use crate::core::{DataService, Entity, StoreError, StoreResult};
use crate::entities::category::Category;
use crate::entities::product::Product;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// ProductType-specific AppState
#[derive(Clone)]
pub struct ProductTypeAppState {
    pub store: Arc<dyn DataService<ProductType>>,
    pub products: Arc<dyn DataService<Product>>,
    pub categories: Arc<dyn DataService<Category>>,
}

impl ProductTypeAppState {
    async fn find(&self, id: &Uuid) -> StoreResult<ProductType> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| StoreError::not_found(ProductType::resource_name_singular(), id))
    }

    async fn check_category(&self, category: Option<&Uuid>) -> StoreResult<()> {
        match category {
            Some(id) if self.categories.get(id).await?.is_none() => {
                Err(StoreError::field("category", "category does not exist"))
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductTypeQuery {
    pub category: Option<Uuid>,
}

/// `GET /types`: active types by name, optionally within one category
pub async fn list_product_types(
    State(state): State<ProductTypeAppState>,
    Query(query): Query<ProductTypeQuery>,
) -> StoreResult<Json<Vec<ProductType>>> {
    let mut types: Vec<ProductType> = state
        .store
        .list()
        .await?
        .into_iter()
        .filter(|t| t.is_active && query.category.is_none_or(|c| t.category == Some(c)))
        .collect();
    types.sort_by(|a, b| a.slug.cmp(&b.slug));
    Ok(Json(types))
}

pub async fn get_product_type(
    State(state): State<ProductTypeAppState>,
    Path(id): Path<String>,
) -> StoreResult<Json<ProductType>> {
    let id = Uuid::parse_str(&id)?;
    let product_type = state.find(&id).await?;
    if !product_type.is_active {
        return Err(StoreError::not_found(
            ProductType::resource_name_singular(),
            id,
        ));
    }
    Ok(Json(product_type))
}

pub async fn create_product_type(
    State(state): State<ProductTypeAppState>,
    Validated(payload): Validated<CreateProductType>,
) -> StoreResult<(StatusCode, Json<ProductType>)> {
    state.check_category(payload.category.as_ref()).await?;

    let mut product_type = ProductType::new(&payload.name, payload.category);
    product_type.is_active = payload.is_active;

    let created = state.store.create(product_type).await?;
    tracing::info!(type_id = %created.id, name = %created.name, "product type created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_product_type(
    State(state): State<ProductTypeAppState>,
    Path(id): Path<String>,
    Validated(payload): Validated<UpdateProductType>,
) -> StoreResult<Json<ProductType>> {
    let id = Uuid::parse_str(&id)?;
    let mut product_type = state.find(&id).await?;
    state.check_category(payload.category.as_ref()).await?;

    if let Some(name) = payload.name {
        product_type.rename(&name);
    }
    if let Some(category) = payload.category {
        product_type.category = Some(category);
    }
    if let Some(is_active) = payload.is_active {
        product_type.is_active = is_active;
    }

    product_type.touch();
    let updated = state.store.update(&id, product_type).await?;
    tracing::info!(type_id = %updated.id, "product type updated");
    Ok(Json(updated))
}

/// `DELETE /admin/types/{id}`: refused while products use it
pub async fn delete_product_type(
    State(state): State<ProductTypeAppState>,
    Path(id): Path<String>,
) -> StoreResult<StatusCode> {
    let id = Uuid::parse_str(&id)?;
    let product_type = state.find(&id).await?;

    if !state.products.search("type", &id.to_string()).await?.is_empty() {
        return Err(EntityError::InUse {
            entity_type: ProductType::resource_name_singular().to_string(),
            id: id.to_string(),
            referenced_by: Product::resource_name().to_string(),
        }
        .into());
    }

    state.store.delete(&id).await?;
    tracing::info!(type_id = %id, name = %product_type.name, "product type deleted");
    Ok(StatusCode::NO_CONTENT)
}
