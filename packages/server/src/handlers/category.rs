use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::instrument;

use crate::entity::category;
use crate::error::{AppError, ErrorBody};
use crate::extractors::AppJson;
use crate::models::category::{
    CategoryListResponse, CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest,
};
use crate::models::shared::require_both_names;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/categories",
    tag = "Categories",
    operation_id = "listCategories",
    summary = "List categories, most recent first",
    responses(
        (status = 200, description = "Category list", body = CategoryListResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoryListResponse>, AppError> {
    let rows = category::Entity::find()
        .order_by_desc(category::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let total = rows.len() as u64;
    let categories = rows.into_iter().map(CategoryResponse::from).collect();

    Ok(Json(CategoryListResponse { categories, total }))
}

#[utoipa::path(
    post,
    path = "/api/v1/categories",
    tag = "Categories",
    operation_id = "createCategory",
    summary = "Create a category",
    description = "Both names are required and trimmed before storage.",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, body))]
pub async fn create_category(
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateCategoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (name_ar, name_en) = require_both_names(&body.name_ar, &body.name_en)?;

    let model = category::ActiveModel {
        name_ar: Set(name_ar),
        name_en: Set(name_en),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(CategoryResponse::from(model))))
}

#[utoipa::path(
    patch,
    path = "/api/v1/categories/{id}",
    tag = "Categories",
    operation_id = "updateCategory",
    summary = "Rename a category",
    params(("id" = i32, Path, description = "Category ID")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Category not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, body), fields(id))]
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(body): AppJson<UpdateCategoryRequest>,
) -> Result<Json<CategoryResponse>, AppError> {
    let (name_ar, name_en) = require_both_names(&body.name_ar, &body.name_en)?;

    let existing = category::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".into()))?;

    category::Entity::update_many()
        .set(category::ActiveModel {
            name_ar: Set(name_ar.clone()),
            name_en: Set(name_en.clone()),
            ..Default::default()
        })
        .filter(category::Column::Id.eq(id))
        .exec(&state.db)
        .await?;

    Ok(Json(CategoryResponse::from(category::Model {
        name_ar,
        name_en,
        ..existing
    })))
}

#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    tag = "Categories",
    operation_id = "deleteCategory",
    summary = "Delete a category",
    description = "Refused while brands or media still reference the category; the \
        foreign-key violation is surfaced as a conflict and the row is kept. \
        Dependents are never deleted in cascade.",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Category not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Category still referenced (CONSTRAINT_VIOLATED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    delete_category_by_id(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete one category, refusing while dependents reference it.
pub async fn delete_category_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), AppError> {
    let result = category::Entity::delete_by_id(id).exec(db).await;

    match result {
        Ok(res) if res.rows_affected == 0 => {
            Err(AppError::NotFound("Category not found".into()))
        }
        Ok(_) => Ok(()),
        Err(err) => match AppError::from(err) {
            AppError::ConstraintViolated(_) => Err(AppError::ConstraintViolated(
                "Category still has brands or media attached".into(),
            )),
            other => Err(other),
        },
    }
}
