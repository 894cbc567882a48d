//! Category handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use toko_core::validation::validate_category_name;
use toko_core::{Category, CoreError};

use crate::error::{ApiError, ApiResult};
use crate::routes::AppState;

/// Body for create and update.
#[derive(Debug, Deserialize)]
pub struct CategoryPayload {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    Ok(Json(state.db.categories().list().await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Category>> {
    let category = state
        .db
        .categories()
        .get_by_id(id)
        .await?
        .ok_or(ApiError::NotFound {
            entity: "Category",
            id,
        })?;
    Ok(Json(category))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CategoryPayload>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    validate_category_name(&payload.name).map_err(CoreError::from)?;

    let created = state
        .db
        .categories()
        .insert(payload.name.trim(), &payload.description)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryPayload>,
) -> ApiResult<Json<Category>> {
    validate_category_name(&payload.name).map_err(CoreError::from)?;

    let category = Category {
        id,
        name: payload.name.trim().to_string(),
        description: payload.description,
    };
    state.db.categories().update(&category).await?;
    Ok(Json(category))
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    state.db.categories().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
