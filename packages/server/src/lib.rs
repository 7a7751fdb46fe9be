pub mod config;
pub mod database;
pub mod editor;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod fields;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;

use axum::http::{HeaderValue, Method};
use axum::routing::post;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lawha Portfolio Admin API",
        version = "1.0.0",
        description = "Bilingual content management backend for the Lawha portfolio dashboard"
    ),
    paths(
        handlers::content::get_text,
        handlers::content::save_text,
        handlers::content::get_asset,
        handlers::content::upload_asset,
        handlers::content::remove_asset,
        handlers::category::list_categories,
        handlers::category::create_category,
        handlers::category::update_category,
        handlers::category::delete_category,
        handlers::brand::list_brands,
        handlers::brand::create_brand,
        handlers::brand::delete_brand,
        handlers::media::list_media,
        handlers::media::upload_media,
        handlers::media::delete_media,
        handlers::proxy::delete_media_asset,
    ),
    components(schemas(
        error::ErrorBody,
        models::content::TextPairResponse,
        models::content::SaveTextRequest,
        models::content::SaveTextResponse,
        models::content::AssetPairResponse,
        models::content::AssetUploadResponse,
        models::content::AssetRemoveResponse,
        models::category::CreateCategoryRequest,
        models::category::UpdateCategoryRequest,
        models::category::CategoryResponse,
        models::category::CategoryListResponse,
        models::brand::BrandResponse,
        models::brand::BrandCreatedResponse,
        models::brand::BrandListResponse,
        models::media::MediaCategory,
        models::media::MediaItemResponse,
        models::media::MediaListResponse,
        models::media::MediaBatchResponse,
        handlers::proxy::DeleteAssetRequest,
    )),
    tags(
        (name = "Content", description = "Bilingual hero-section fields and their assets"),
        (name = "Categories", description = "Portfolio category CRUD"),
        (name = "Brands", description = "Brands within a category"),
        (name = "Media", description = "Gallery media batches"),
        (name = "Proxy", description = "Asset host deletion proxy"),
    ),
)]
struct ApiDoc;

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let cors = cors_layer(&state.config.server.cors);

    axum::Router::new()
        .nest("/api", routes::api_routes())
        // Kept at the root path for compatibility with deployed frontends.
        .route("/delete-media-asset", post(handlers::proxy::delete_media_asset))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .layer(cors)
}

fn cors_layer(config: &config::CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(config.max_age));

    let origins: Vec<HeaderValue> = config
        .allow_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins)
    }
}
