use std::sync::Arc;

use common::AssetStore;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub assets: Arc<dyn AssetStore>,
    pub config: Arc<AppConfig>,
}
