//! Product handlers.
//!
//! Reads embed the referenced category as a snapshot; create and
//! update verify the category exists up front so the client gets a
//! not-found for the category rather than a bare constraint error.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use toko_core::validation::{validate_price, validate_product_name, validate_stock};
use toko_core::{CoreError, Product};

use crate::error::{ApiError, ApiResult};
use crate::routes::AppState;

/// Body for create and update.
#[derive(Debug, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub price: i64,
    pub stock: i64,
    pub category_id: i64,
}

impl ProductPayload {
    fn validate(&self) -> Result<(), CoreError> {
        validate_product_name(&self.name)?;
        validate_price(self.price)?;
        validate_stock(self.stock)?;
        Ok(())
    }
}

async fn require_category(state: &AppState, id: i64) -> ApiResult<()> {
    state
        .db
        .categories()
        .get_by_id(id)
        .await?
        .ok_or(ApiError::NotFound {
            entity: "Category",
            id,
        })?;
    Ok(())
}

async fn with_category(state: &AppState, mut product: Product) -> ApiResult<Product> {
    product.category = state.db.categories().get_by_id(product.category_id).await?;
    Ok(product)
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Product>>> {
    let mut products = state.db.products().list().await?;
    for product in &mut products {
        product.category = state.db.categories().get_by_id(product.category_id).await?;
    }
    Ok(Json(products))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<Product>> {
    let product = state
        .db
        .products()
        .get_by_id(id)
        .await?
        .ok_or(ApiError::NotFound {
            entity: "Product",
            id,
        })?;
    Ok(Json(with_category(&state, product).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<ProductPayload>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    payload.validate()?;
    require_category(&state, payload.category_id).await?;

    let created = state
        .db
        .products()
        .insert(
            payload.name.trim(),
            payload.price,
            payload.stock,
            payload.category_id,
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(with_category(&state, created).await?),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductPayload>,
) -> ApiResult<Json<Product>> {
    payload.validate()?;
    require_category(&state, payload.category_id).await?;

    let product = Product {
        id,
        name: payload.name.trim().to_string(),
        price: payload.price,
        stock: payload.stock,
        category_id: payload.category_id,
        category: None,
    };
    state.db.products().update(&product).await?;
    Ok(Json(with_category(&state, product).await?))
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    state.db.products().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
