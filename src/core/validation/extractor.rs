//! Axum extractors for JSON request bodies
//!
//! Both extractors turn axum's JSON rejections into [`StoreError`] so every
//! malformed body (bad syntax, wrong types, unknown fields on allow-listed
//! PATCH structs) is answered with the same 400 error envelope.

use crate::core::error::{StoreError, ValidationError};
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body that has been deserialized and passed its `validator` rules
///
/// ```rust,ignore
/// pub async fn create_promo_code(
///     State(state): State<PromoCodeState>,
///     Validated(payload): Validated<CreatePromoCode>,
/// ) -> StoreResult<Json<PromoCode>> { ... }
/// ```
pub struct Validated<T>(pub T);

/// JSON body deserialized without field rules
pub struct JsonBody<T>(pub T);

fn rejection_to_error(rejection: JsonRejection) -> StoreError {
    StoreError::Validation(ValidationError::InvalidJson {
        message: rejection.body_text(),
    })
}

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = StoreError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;
        Ok(JsonBody(payload))
    }
}

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = StoreError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(payload) = JsonBody::<T>::from_request(req, state).await?;
        payload.validate()?;
        Ok(Validated(payload))
    }
}
