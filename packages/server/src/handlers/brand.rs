use axum::extract::{DefaultBodyLimit, Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use common::{derive_public_id, AssetStore, AssetUpload, ResourceType};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{instrument, warn};

use crate::entity::{brand, category};
use crate::error::{AppError, ErrorBody};
use crate::models::brand::{BrandCreatedResponse, BrandListQuery, BrandListResponse, BrandResponse};
use crate::models::shared::require_any_name;
use crate::state::AppState;

pub fn brand_upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(12 * 1024 * 1024) // 12 MB
}

/// Parsed form input for brand creation.
pub struct NewBrand {
    pub name_ar: String,
    pub name_en: String,
    pub category_id: i32,
    pub logo: Option<AssetUpload>,
}

#[utoipa::path(
    get,
    path = "/api/v1/brands",
    tag = "Brands",
    operation_id = "listBrands",
    summary = "List brands of a category, ordered by Arabic name",
    params(BrandListQuery),
    responses(
        (status = 200, description = "Brand list", body = BrandListResponse),
    ),
)]
#[instrument(skip(state), fields(category_id = query.category_id))]
pub async fn list_brands(
    State(state): State<AppState>,
    Query(query): Query<BrandListQuery>,
) -> Result<Json<BrandListResponse>, AppError> {
    let rows = brand::Entity::find()
        .filter(brand::Column::CategoryId.eq(query.category_id))
        .order_by_asc(brand::Column::NameAr)
        .all(&state.db)
        .await?;

    let total = rows.len() as u64;
    let brands = rows.into_iter().map(BrandResponse::from).collect();

    Ok(Json(BrandListResponse { brands, total }))
}

#[utoipa::path(
    post,
    path = "/api/v1/brands",
    tag = "Brands",
    operation_id = "createBrand",
    summary = "Create a brand, optionally with a logo",
    description = "Multipart form with `name_ar`, `name_en`, `category_id` and an optional \
        `logo` file. At least one name must be non-empty. The brand row is inserted \
        before the logo upload; a logo failure is reported in `logo_error` and leaves \
        the brand persisted without a logo.",
    request_body(content_type = "multipart/form-data", description = "Brand fields with optional logo"),
    responses(
        (status = 201, description = "Brand created", body = BrandCreatedResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Category not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn create_brand(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut name_ar = String::new();
    let mut name_en = String::new();
    let mut category_id: Option<i32> = None;
    let mut logo: Option<AssetUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        match field.name() {
            Some("name_ar") => name_ar = read_text(field, "name_ar").await?,
            Some("name_en") => name_en = read_text(field, "name_en").await?,
            Some("category_id") => {
                let text = read_text(field, "category_id").await?;
                category_id = Some(text.trim().parse().map_err(|_| {
                    AppError::Validation("category_id must be an integer".into())
                })?);
            }
            Some("logo") => logo = Some(super::upload_from_field(field).await?),
            _ => {}
        }
    }

    let category_id =
        category_id.ok_or_else(|| AppError::Validation("Missing 'category_id' field".into()))?;

    let (model, logo_error) = create_brand_with_logo(
        &state.db,
        &*state.assets,
        NewBrand {
            name_ar,
            name_en,
            category_id,
            logo,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(BrandCreatedResponse {
            brand: BrandResponse::from(model),
            logo_error,
        }),
    ))
}

/// Insert the brand row, then attach the logo if one was supplied.
///
/// The insert happens first so a logo failure can never lose the brand; the
/// returned error string stands in for the logo, not the row.
pub async fn create_brand_with_logo<C: ConnectionTrait>(
    db: &C,
    assets: &dyn AssetStore,
    input: NewBrand,
) -> Result<(brand::Model, Option<String>), AppError> {
    let (name_ar, name_en) = require_any_name(&input.name_ar, &input.name_en)?;

    if let Some(ref file) = input.logo {
        if file.resource_type() != Some(ResourceType::Image) {
            return Err(AppError::Validation(format!(
                "Logo must be an image, got {}",
                file.content_type
            )));
        }
    }

    category::Entity::find_by_id(input.category_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".into()))?;

    let mut model = brand::ActiveModel {
        name_ar: Set(name_ar),
        name_en: Set(name_en),
        category_id: Set(input.category_id),
        logo: Set(None),
        logo_public_id: Set(None),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let Some(file) = input.logo else {
        return Ok((model, None));
    };

    let asset = match assets.upload(file).await {
        Ok(asset) => asset,
        Err(err) => {
            warn!(brand_id = model.id, error = %err, "brand created but logo upload failed");
            return Ok((model, Some(err.to_string())));
        }
    };

    let patch = brand::ActiveModel {
        logo: Set(Some(asset.url.clone())),
        logo_public_id: Set(Some(asset.public_id.clone())),
        ..Default::default()
    };
    match brand::Entity::update_many()
        .set(patch)
        .filter(brand::Column::Id.eq(model.id))
        .exec(db)
        .await
    {
        Ok(_) => {
            model.logo = Some(asset.url);
            model.logo_public_id = Some(asset.public_id);
            Ok((model, None))
        }
        Err(err) => {
            warn!(
                brand_id = model.id,
                public_id = %asset.public_id,
                "logo hosted but brand update failed; asset orphaned on host"
            );
            Ok((model, Some(err.to_string())))
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/brands/{id}",
    tag = "Brands",
    operation_id = "deleteBrand",
    summary = "Delete a brand",
    description = "Deletes the row first, then cleans up the hosted logo best-effort. \
        A host cleanup failure is logged and does not fail the request.",
    params(("id" = i32, Path, description = "Brand ID")),
    responses(
        (status = 204, description = "Brand deleted"),
        (status = 404, description = "Brand not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_brand(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let model = brand::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Brand not found".into()))?;

    brand::Entity::delete_by_id(id).exec(&state.db).await?;

    let public_id = model
        .logo_public_id
        .or_else(|| model.logo.as_deref().and_then(derive_public_id));
    if let Some(public_id) = public_id {
        if let Err(err) = state.assets.delete(&public_id, ResourceType::Image).await {
            warn!(brand_id = id, %public_id, error = %err, "brand logo cleanup failed");
        }
    }

    Ok(StatusCode::NO_CONTENT)
}

async fn read_text(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read {name}: {e}")))
}
