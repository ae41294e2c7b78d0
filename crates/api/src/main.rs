use std::sync::Arc;

use atelier_api::app::{build_app, AppServices};
use atelier_api::config::AppConfig;
use atelier_infra::SqlitePartStore;

#[tokio::main]
async fn main() {
    atelier_observability::init();

    let config = AppConfig::from_env();

    std::fs::create_dir_all(&config.docs_dir)
        .unwrap_or_else(|e| panic!("failed to create docs dir {:?}: {e}", config.docs_dir));

    let store = SqlitePartStore::open(&config.db_path)
        .await
        .unwrap_or_else(|e| panic!("failed to open database {:?}: {e}", config.db_path));

    let services = Arc::new(AppServices::new(
        store,
        config.letterhead.clone(),
        config.docs_dir.clone(),
    ));
    let app = build_app(services);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {e}", config.bind_addr));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
