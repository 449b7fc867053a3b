//! Category HTTP handlers

use super::model::{Category, CreateCategory, UpdateCategory};
use crate::core::error::EntityError;
use crate::core::validation::{Validated, filters};
use crate::core::{DataService, Entity, StoreError, StoreResult};
use crate::entities::product::Product;
use crate::entities::product_type::ProductType;
use crate::media::{self, ImageHost};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use uuid::Uuid;

/// Image host folder for category pictures
pub const CATEGORY_IMAGE_FOLDER: &str = "categories";

/// Category-specific AppState
#[derive(Clone)]
pub struct CategoryAppState {
    pub store: Arc<dyn DataService<Category>>,
    pub products: Arc<dyn DataService<Product>>,
    pub product_types: Arc<dyn DataService<ProductType>>,
    pub images: Arc<dyn ImageHost>,
}

impl CategoryAppState {
    async fn find(&self, id: &Uuid) -> StoreResult<Category> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| StoreError::not_found(Category::resource_name_singular(), id))
    }
}

/// `GET /categories`: active categories by name
pub async fn list_categories(
    State(state): State<CategoryAppState>,
) -> StoreResult<Json<Vec<Category>>> {
    let mut categories: Vec<Category> = state
        .store
        .list()
        .await?
        .into_iter()
        .filter(|c| c.is_active)
        .collect();
    categories.sort_by(|a, b| a.slug.cmp(&b.slug));
    Ok(Json(categories))
}

pub async fn get_category(
    State(state): State<CategoryAppState>,
    Path(id): Path<String>,
) -> StoreResult<Json<Category>> {
    let id = Uuid::parse_str(&id)?;
    let category = state.find(&id).await?;
    if !category.is_active {
        return Err(StoreError::not_found(Category::resource_name_singular(), id));
    }
    Ok(Json(category))
}

pub async fn create_category(
    State(state): State<CategoryAppState>,
    Validated(payload): Validated<CreateCategory>,
) -> StoreResult<(StatusCode, Json<Category>)> {
    let resolved = media::resolve_images(
        state.images.as_ref(),
        payload.image.into_iter().collect(),
        CATEGORY_IMAGE_FOLDER,
    )
    .await?;

    let mut category = Category::new(&payload.name);
    category.description = filters::non_blank(payload.description);
    category.image = resolved.images.into_iter().next();
    category.is_active = payload.is_active;

    let created = match state.store.create(category).await {
        Ok(created) => created,
        Err(e) => {
            media::destroy_quietly(state.images.as_ref(), &resolved.uploaded).await;
            return Err(e.into());
        }
    };
    tracing::info!(category_id = %created.id, name = %created.name, "category created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PATCH /admin/categories/{id}`; a new image replaces and destroys the old one
pub async fn update_category(
    State(state): State<CategoryAppState>,
    Path(id): Path<String>,
    Validated(payload): Validated<UpdateCategory>,
) -> StoreResult<Json<Category>> {
    let id = Uuid::parse_str(&id)?;
    let mut category = state.find(&id).await?;

    let mut previous_image = None;
    let mut uploaded = Vec::new();
    if let Some(image) = payload.image {
        let resolved =
            media::resolve_images(state.images.as_ref(), vec![image], CATEGORY_IMAGE_FOLDER)
                .await?;
        uploaded = resolved.uploaded;
        let next = resolved.images.into_iter().next();
        if category.image.as_ref().map(|i| &i.public_id) != next.as_ref().map(|i| &i.public_id) {
            previous_image = category.image.take();
        }
        category.image = next;
    }

    if let Some(name) = payload.name {
        category.rename(&name);
    }
    if let Some(description) = payload.description {
        category.description = filters::non_blank(Some(description));
    }
    if let Some(is_active) = payload.is_active {
        category.is_active = is_active;
    }

    category.touch();
    let updated = match state.store.update(&id, category).await {
        Ok(updated) => updated,
        Err(e) => {
            media::destroy_quietly(state.images.as_ref(), &uploaded).await;
            return Err(e.into());
        }
    };
    if let Some(previous) = previous_image {
        media::destroy_quietly(state.images.as_ref(), &[previous]).await;
    }
    tracing::info!(category_id = %updated.id, "category updated");
    Ok(Json(updated))
}

/// `DELETE /admin/categories/{id}`: refused while products or types use it
pub async fn delete_category(
    State(state): State<CategoryAppState>,
    Path(id): Path<String>,
) -> StoreResult<StatusCode> {
    let id = Uuid::parse_str(&id)?;
    let category = state.find(&id).await?;

    let key = id.to_string();
    let referenced_by = if !state.products.search("category", &key).await?.is_empty() {
        Some(Product::resource_name())
    } else if !state.product_types.search("category", &key).await?.is_empty() {
        Some(ProductType::resource_name())
    } else {
        None
    };
    if let Some(referenced_by) = referenced_by {
        return Err(EntityError::InUse {
            entity_type: Category::resource_name_singular().to_string(),
            id: key,
            referenced_by: referenced_by.to_string(),
        }
        .into());
    }

    state.store.delete(&id).await?;
    if let Some(image) = &category.image {
        media::destroy_quietly(state.images.as_ref(), std::slice::from_ref(image)).await;
    }
    tracing::info!(category_id = %id, name = %category.name, "category deleted");
    Ok(StatusCode::NO_CONTENT)
}
