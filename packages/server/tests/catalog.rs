mod support;

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use chrono::Utc;
use common::{AssetUpload, ResourceType};
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, RuntimeErr};

use server::config::{AppConfig, CorsConfig, DatabaseConfig, ServerConfig};
use server::entity::{brand, category, media};
use server::error::AppError;
use server::handlers::brand::{create_brand_with_logo, NewBrand};
use server::handlers::category::delete_category_by_id;
use server::handlers::media::upload_batch;
use server::state::AppState;
use support::RecordingAssetStore;

fn shoes() -> category::Model {
    category::Model {
        id: 1,
        name_ar: "أحذية".into(),
        name_en: "Shoes".into(),
        created_at: Utc::now(),
    }
}

fn media_row(id: i32, title: &str) -> media::Model {
    media::Model {
        id,
        title: title.into(),
        media_type: "image".into(),
        file_url: format!("https://res.host.test/demo/image/upload/v1/{title}.png"),
        public_id: format!("{title}-{id}"),
        category_id: 1,
        created_at: Utc::now(),
    }
}

fn image(name: &str) -> AssetUpload {
    AssetUpload {
        bytes: vec![0u8; 64],
        filename: name.into(),
        content_type: "image/png".into(),
    }
}

fn ok_exec() -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected: 1,
    }
}

mod media_batches {
    use super::*;

    #[tokio::test]
    async fn whole_batch_uploads_sequentially() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![media_row(1, "a")], vec![media_row(2, "b")]])
            .into_connection();
        let store = RecordingAssetStore::new();

        let result = upload_batch(
            &db,
            &store,
            &shoes(),
            vec![image("a.png"), image("b.png")],
        )
        .await
        .unwrap();

        assert_eq!(result.uploaded.len(), 2);
        assert_eq!(result.failed_index, None);
        assert_eq!(result.error, None);
        assert_eq!(
            store.uploads(),
            vec!["a.png".to_string(), "b.png".to_string()]
        );
        assert_eq!(
            result.uploaded[0].category.as_ref().unwrap().name_ar,
            "أحذية"
        );
    }

    #[tokio::test]
    async fn failure_aborts_the_rest_and_keeps_prior_uploads() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![media_row(1, "a")]])
            .into_connection();
        let store = RecordingAssetStore::failing_upload_at(2);

        let result = upload_batch(
            &db,
            &store,
            &shoes(),
            vec![image("a.png"), image("b.png"), image("c.png")],
        )
        .await
        .unwrap();

        // The first item stays persisted; the third was never attempted.
        assert_eq!(result.uploaded.len(), 1);
        assert_eq!(result.failed_index, Some(2));
        assert!(result.error.is_some());
        assert_eq!(
            store.uploads(),
            vec!["a.png".to_string(), "b.png".to_string()]
        );
    }

    #[tokio::test]
    async fn invalid_batch_costs_no_network_traffic() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let store = RecordingAssetStore::new();

        let files = vec![
            image("a.png"),
            AssetUpload {
                bytes: vec![0u8; 64],
                filename: "notes.pdf".into(),
                content_type: "application/pdf".into(),
            },
        ];
        let err = upload_batch(&db, &store, &shoes(), files).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert!(store.uploads().is_empty());
        assert!(db.into_transaction_log().is_empty());
    }
}

mod category_delete {
    use super::*;

    #[tokio::test]
    async fn foreign_key_violation_keeps_the_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_errors([DbErr::Exec(RuntimeErr::Internal(
                "update or delete on table \"categories\" violates foreign key constraint \
                 \"brand_category_id_fkey\" (SQLSTATE 23503)"
                    .into(),
            ))])
            .into_connection();

        let err = delete_category_by_id(&db, 1).await.unwrap_err();
        match err {
            AppError::ConstraintViolated(msg) => {
                assert_eq!(msg, "Category still has brands or media attached");
            }
            other => panic!("expected ConstraintViolated, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_category_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let err = delete_category_by_id(&db, 42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn unreferenced_category_deletes() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([ok_exec()])
            .into_connection();

        delete_category_by_id(&db, 1).await.unwrap();
    }
}

mod brand_create {
    use super::*;

    fn nike(logo: Option<AssetUpload>) -> NewBrand {
        NewBrand {
            name_ar: "نايك".into(),
            name_en: "Nike".into(),
            category_id: 1,
            logo,
        }
    }

    fn nike_row() -> brand::Model {
        brand::Model {
            id: 5,
            name_ar: "نايك".into(),
            name_en: "Nike".into(),
            category_id: 1,
            logo: None,
            logo_public_id: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn logo_is_attached_after_the_row_exists() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![shoes()]])
            .append_query_results([vec![nike_row()]])
            .append_exec_results([ok_exec()])
            .into_connection();
        let store = RecordingAssetStore::new();

        let (model, logo_error) = create_brand_with_logo(&db, &store, nike(Some(image("nike.png"))))
            .await
            .unwrap();

        assert_eq!(logo_error, None);
        assert!(model.logo.as_deref().unwrap().contains("nike.png"));
        assert_eq!(model.logo_public_id.as_deref(), Some("nike-1"));
        assert_eq!(store.uploads(), vec!["nike.png".to_string()]);
    }

    #[tokio::test]
    async fn logo_failure_still_creates_the_brand() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![shoes()]])
            .append_query_results([vec![nike_row()]])
            .into_connection();
        let store = RecordingAssetStore::failing_upload_at(1);

        let (model, logo_error) = create_brand_with_logo(&db, &store, nike(Some(image("nike.png"))))
            .await
            .unwrap();

        assert!(logo_error.is_some());
        assert_eq!(model.logo, None);
        assert_eq!(model.name_en, "Nike");
    }

    #[tokio::test]
    async fn at_least_one_name_is_required() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let store = RecordingAssetStore::new();

        let err = create_brand_with_logo(
            &db,
            &store,
            NewBrand {
                name_ar: "  ".into(),
                name_en: "".into(),
                category_id: 1,
                logo: None,
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn one_name_is_enough() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![shoes()]])
            .append_query_results([vec![brand::Model {
                name_ar: String::new(),
                ..nike_row()
            }]])
            .into_connection();
        let store = RecordingAssetStore::new();

        let (model, logo_error) = create_brand_with_logo(
            &db,
            &store,
            NewBrand {
                name_ar: String::new(),
                name_en: "Nike".into(),
                category_id: 1,
                logo: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(logo_error, None);
        assert_eq!(model.name_en, "Nike");
        assert!(store.uploads().is_empty());
    }
}

mod media_delete {
    use super::*;

    fn test_state(db: sea_orm::DatabaseConnection, store: Arc<RecordingAssetStore>) -> AppState {
        AppState {
            db,
            assets: store,
            config: Arc::new(AppConfig {
                server: ServerConfig {
                    host: "127.0.0.1".into(),
                    port: 0,
                    cors: CorsConfig {
                        allow_origins: vec![],
                        max_age: 3600,
                    },
                },
                database: DatabaseConfig {
                    url: "postgres://unused".into(),
                },
                assets: common::AssetHostConfig {
                    base_url: "https://api.host.test/v1_1".into(),
                    cloud_name: "demo".into(),
                    upload_preset: "unsigned".into(),
                    api_key: String::new(),
                    api_secret: String::new(),
                },
            }),
        }
    }

    #[tokio::test]
    async fn host_delete_runs_before_the_record_is_touched() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![media_row(3, "clip")]])
            .append_exec_results([ok_exec()])
            .into_connection();
        let store = Arc::new(RecordingAssetStore::new());
        let state = test_state(db, Arc::clone(&store));

        let response = server::handlers::media::delete_media(State(state), Path(3))
            .await
            .unwrap()
            .into_response();

        assert_eq!(response.status(), 204);
        assert_eq!(
            store.deletes(),
            vec![("clip-3".to_string(), ResourceType::Image)]
        );
    }

    #[tokio::test]
    async fn host_failure_aborts_and_keeps_the_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![media_row(3, "clip")]])
            .into_connection();
        let store = Arc::new(RecordingAssetStore::failing_deletes());
        let state = test_state(db, Arc::clone(&store));

        // The row deletion is never issued; no exec result was queued and
        // none is consumed.
        match server::handlers::media::delete_media(State(state), Path(3)).await {
            Err(AppError::UploadFailed(_)) => {}
            Err(other) => panic!("expected UploadFailed, got {other:?}"),
            Ok(_) => panic!("expected the host failure to abort the delete"),
        }
    }
}
