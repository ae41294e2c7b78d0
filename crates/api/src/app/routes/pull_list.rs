use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use atelier_core::PartId;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(get_pull_list).delete(clear_pull_list))
        .route("/items", post(add_line))
        .route("/document", post(generate_document))
        .route("/finalize", post(finalize))
}

pub async fn get_pull_list(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let lines = services.pull_list().await;
    let grand_total: u64 = lines
        .iter()
        .filter_map(|line| line.line_total().ok())
        .map(|total| total.cents())
        .sum();

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "lines": lines,
            "grand_total": grand_total,
        })),
    )
        .into_response()
}

pub async fn add_line(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::AddPullLineRequest>,
) -> axum::response::Response {
    let id = PartId::from_raw(body.part_id);
    match services.add_to_pull_list(id, body.qty).await {
        Ok(()) => {
            let count = services.pull_list().await.len();
            (
                StatusCode::CREATED,
                Json(serde_json::json!({ "lines": count })),
            )
                .into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn clear_pull_list(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    services.clear_pull_list().await;
    (StatusCode::OK, Json(serde_json::json!({ "lines": 0 }))).into_response()
}

/// Workshop copy: renders the document without touching stock.
pub async fn generate_document(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.generate_pull_list_document().await {
        Ok(path) => (
            StatusCode::OK,
            Json(serde_json::json!({ "path": path })),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn finalize(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::FinalizeRequest>,
) -> axum::response::Response {
    match services.finalize(&body.customer).await {
        Ok(Some(artifact)) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "finalized": true,
                "invoice": artifact,
            })),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::OK,
            Json(serde_json::json!({ "finalized": false })),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
