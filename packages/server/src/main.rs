use std::sync::Arc;

use common::HostedAssetStore;
use tracing::{Level, info};

use server::config::AppConfig;
use server::database::init_db;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;
    let db = init_db(&config.database.url).await?;

    let state = AppState {
        db,
        assets: Arc::new(HostedAssetStore::new(config.assets.clone())),
        config: Arc::new(config),
    };

    let app = server::build_router(state.clone());

    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    info!("Server running at http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
