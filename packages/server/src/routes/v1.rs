use axum::{
    Router,
    routing::{delete, get, patch},
};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/content", content_routes())
        .nest("/categories", category_routes())
        .nest("/brands", brand_routes())
        .nest("/media", media_routes())
}

fn content_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}/text/{field}",
            get(handlers::content::get_text).put(handlers::content::save_text),
        )
        .route(
            "/{id}/asset/{field}",
            get(handlers::content::get_asset)
                .post(handlers::content::upload_asset)
                .delete(handlers::content::remove_asset),
        )
        .layer(handlers::content::asset_upload_body_limit())
}

fn category_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::category::list_categories).post(handlers::category::create_category),
        )
        .route(
            "/{id}",
            patch(handlers::category::update_category)
                .delete(handlers::category::delete_category),
        )
}

fn brand_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::brand::list_brands).post(handlers::brand::create_brand),
        )
        .route("/{id}", delete(handlers::brand::delete_brand))
        .layer(handlers::brand::brand_upload_body_limit())
}

fn media_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::media::list_media).post(handlers::media::upload_media),
        )
        .route("/{id}", delete(handlers::media::delete_media))
        .layer(handlers::media::media_upload_body_limit())
}
