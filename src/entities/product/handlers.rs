//! Product HTTP handlers
//!
//! Read responses populate the category and type references to `{id, name}`
//! and add the markdown percentage and the approved-review rating.

use super::model::{CreateProduct, Product, ProductQuery, ProductSort, UpdateProduct};
use crate::commerce::pricing::markdown_percentage;
use crate::core::validation::{Validated, filters};
use crate::core::{DataService, Entity, PageRequest, PaginatedResponse, StoreError, StoreResult};
use crate::entities::category::Category;
use crate::entities::product_type::ProductType;
use crate::entities::review::{RatingSummary, Review};
use crate::media::{self, HostedImage, ImageHost};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Image host folder for product pictures
pub const PRODUCT_IMAGE_FOLDER: &str = "products";

/// Product-specific AppState
#[derive(Clone)]
pub struct ProductAppState {
    pub store: Arc<dyn DataService<Product>>,
    pub categories: Arc<dyn DataService<Category>>,
    pub product_types: Arc<dyn DataService<ProductType>>,
    pub reviews: Arc<dyn DataService<Review>>,
    pub images: Arc<dyn ImageHost>,
}

impl ProductAppState {
    async fn find(&self, id: &Uuid) -> StoreResult<Product> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| StoreError::not_found(Product::resource_name_singular(), id))
    }

    async fn check_references(&self, category: &Uuid, product_type: &Uuid) -> StoreResult<()> {
        if self.categories.get(category).await?.is_none() {
            return Err(StoreError::field("category", "category does not exist"));
        }
        if self.product_types.get(product_type).await?.is_none() {
            return Err(StoreError::field("type", "product type does not exist"));
        }
        Ok(())
    }
}

/// Names and ratings needed to render product views
#[derive(Default)]
struct CatalogLookup {
    categories: HashMap<Uuid, String>,
    types: HashMap<Uuid, String>,
    ratings: HashMap<Uuid, RatingSummary>,
}

impl CatalogLookup {
    /// Everything, for listings
    async fn all(state: &ProductAppState) -> StoreResult<Self> {
        let categories = state
            .categories
            .list()
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();
        let types = state
            .product_types
            .list()
            .await?
            .into_iter()
            .map(|t| (t.id, t.name))
            .collect();

        let mut by_product: HashMap<Uuid, Vec<Review>> = HashMap::new();
        for review in state.reviews.list().await? {
            by_product.entry(review.product).or_default().push(review);
        }
        let ratings = by_product
            .iter()
            .map(|(product, reviews)| (*product, RatingSummary::of(reviews)))
            .collect();

        Ok(Self {
            categories,
            types,
            ratings,
        })
    }

    /// Just what one product references
    async fn for_product(state: &ProductAppState, product: &Product) -> StoreResult<Self> {
        let mut lookup = Self::default();
        if let Some(category) = state.categories.get(&product.category).await? {
            lookup.categories.insert(category.id, category.name);
        }
        if let Some(product_type) = state.product_types.get(&product.product_type).await? {
            lookup.types.insert(product_type.id, product_type.name);
        }
        let reviews = state
            .reviews
            .search("product", &product.id.to_string())
            .await?;
        lookup.ratings.insert(product.id, RatingSummary::of(&reviews));
        Ok(lookup)
    }

    fn view(&self, product: &Product) -> StoreResult<Value> {
        let rating = self.ratings.get(&product.id).copied().unwrap_or_default();

        let mut value = serde_json::to_value(product)?;
        value["category"] = reference(product.category, self.categories.get(&product.category));
        value["type"] = reference(product.product_type, self.types.get(&product.product_type));
        value["discountPercentage"] = json!(markdown_percentage(product.price, product.original_price));
        value["averageRating"] = json!(rating.average_rating);
        value["reviewCount"] = json!(rating.review_count);
        Ok(value)
    }
}

fn reference(id: Uuid, name: Option<&String>) -> Value {
    json!({ "id": id, "name": name })
}

/// `GET /products`: active products only
pub async fn list_products(
    State(state): State<ProductAppState>,
    Query(query): Query<ProductQuery>,
) -> StoreResult<Json<PaginatedResponse<Value>>> {
    let sort = match query.sort.as_deref() {
        Some(raw) => ProductSort::parse(raw).ok_or_else(|| {
            StoreError::field(
                "sort",
                "sort must be price, createdAt or name followed by :asc or :desc",
            )
        })?,
        None => ProductSort::CreatedAtDesc,
    };

    let mut products: Vec<Product> = state
        .store
        .list()
        .await?
        .into_iter()
        .filter(|p| p.is_active && query.matches(p))
        .collect();
    sort.sort(&mut products);

    let page = PageRequest::new(query.page, query.limit).paginate(products);
    let lookup = CatalogLookup::all(&state).await?;
    let data = page
        .data
        .iter()
        .map(|p| lookup.view(p))
        .collect::<StoreResult<Vec<_>>>()?;

    Ok(Json(PaginatedResponse {
        data,
        pagination: page.pagination,
    }))
}

/// `GET /products/{id}`: inactive products are hidden
pub async fn get_product(
    State(state): State<ProductAppState>,
    Path(id): Path<String>,
) -> StoreResult<Json<Value>> {
    let id = Uuid::parse_str(&id)?;
    let product = state.find(&id).await?;
    if !product.is_active {
        return Err(StoreError::not_found(Product::resource_name_singular(), id));
    }

    let lookup = CatalogLookup::for_product(&state, &product).await?;
    Ok(Json(lookup.view(&product)?))
}

pub async fn create_product(
    State(state): State<ProductAppState>,
    Validated(payload): Validated<CreateProduct>,
) -> StoreResult<(StatusCode, Json<Value>)> {
    state
        .check_references(&payload.category, &payload.product_type)
        .await?;

    let resolved =
        media::resolve_images(state.images.as_ref(), payload.images, PRODUCT_IMAGE_FOLDER).await?;

    let now = Utc::now();
    let product = Product {
        id: Uuid::new_v4(),
        name: filters::trim(&payload.name),
        description: filters::trim(&payload.description),
        price: filters::round_decimals(payload.price, 2),
        original_price: payload.original_price.map(|p| filters::round_decimals(p, 2)),
        category: payload.category,
        product_type: payload.product_type,
        sizes: payload.sizes,
        colors: payload.colors,
        gender: payload.gender,
        images: resolved.images,
        stock: payload.stock,
        is_active: payload.is_active,
        product_tags: payload.product_tags,
        created_at: now,
        updated_at: now,
    };

    let created = match state.store.create(product).await {
        Ok(created) => created,
        Err(e) => {
            media::destroy_quietly(state.images.as_ref(), &resolved.uploaded).await;
            return Err(e.into());
        }
    };
    tracing::info!(product_id = %created.id, name = %created.name, "product created");

    let lookup = CatalogLookup::for_product(&state, &created).await?;
    Ok((StatusCode::CREATED, Json(lookup.view(&created)?)))
}

/// `PATCH /admin/products/{id}`
///
/// A new `images` list replaces the old one; hosted images that are no longer
/// listed are destroyed once the update is stored.
pub async fn update_product(
    State(state): State<ProductAppState>,
    Path(id): Path<String>,
    Validated(payload): Validated<UpdateProduct>,
) -> StoreResult<Json<Value>> {
    let id = Uuid::parse_str(&id)?;
    let mut product = state.find(&id).await?;

    state
        .check_references(
            payload.category.as_ref().unwrap_or(&product.category),
            payload.product_type.as_ref().unwrap_or(&product.product_type),
        )
        .await?;

    let mut replaced: Vec<HostedImage> = Vec::new();
    let mut uploaded: Vec<HostedImage> = Vec::new();
    if let Some(images) = payload.images {
        let resolved =
            media::resolve_images(state.images.as_ref(), images, PRODUCT_IMAGE_FOLDER).await?;
        replaced = product
            .images
            .iter()
            .filter(|old| !resolved.images.iter().any(|new| new.public_id == old.public_id))
            .cloned()
            .collect();
        uploaded = resolved.uploaded;
        product.images = resolved.images;
    }

    if let Some(name) = payload.name {
        product.name = filters::trim(&name);
    }
    if let Some(description) = payload.description {
        product.description = filters::trim(&description);
    }
    if let Some(price) = payload.price {
        product.price = filters::round_decimals(price, 2);
    }
    if let Some(original_price) = payload.original_price {
        product.original_price = original_price.map(|p| filters::round_decimals(p, 2));
    }
    if let Some(category) = payload.category {
        product.category = category;
    }
    if let Some(product_type) = payload.product_type {
        product.product_type = product_type;
    }
    if let Some(sizes) = payload.sizes {
        product.sizes = sizes;
    }
    if let Some(colors) = payload.colors {
        product.colors = colors;
    }
    if let Some(gender) = payload.gender {
        product.gender = gender;
    }
    if let Some(stock) = payload.stock {
        product.stock = stock;
    }
    if let Some(is_active) = payload.is_active {
        product.is_active = is_active;
    }
    if let Some(product_tags) = payload.product_tags {
        product.product_tags = product_tags;
    }

    product.touch();
    let updated = match state.store.update(&id, product).await {
        Ok(updated) => updated,
        Err(e) => {
            media::destroy_quietly(state.images.as_ref(), &uploaded).await;
            return Err(e.into());
        }
    };
    media::destroy_quietly(state.images.as_ref(), &replaced).await;
    tracing::info!(product_id = %updated.id, "product updated");

    let lookup = CatalogLookup::for_product(&state, &updated).await?;
    Ok(Json(lookup.view(&updated)?))
}

/// `DELETE /admin/products/{id}`: also destroys the hosted images and the reviews
pub async fn delete_product(
    State(state): State<ProductAppState>,
    Path(id): Path<String>,
) -> StoreResult<StatusCode> {
    let id = Uuid::parse_str(&id)?;
    let product = state
        .store
        .delete(&id)
        .await?
        .ok_or_else(|| StoreError::not_found(Product::resource_name_singular(), id))?;

    media::destroy_quietly(state.images.as_ref(), &product.images).await;

    for review in state.reviews.search("product", &id.to_string()).await? {
        state.reviews.delete(&review.id).await?;
    }

    tracing::info!(product_id = %id, name = %product.name, "product deleted");
    Ok(StatusCode::NO_CONTENT)
}
