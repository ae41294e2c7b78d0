use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use atelier_notify::EmailConfig;

use crate::app::{dto, errors};
use crate::app::services::{AppServices, ServiceError};

pub fn router() -> Router {
    Router::new()
        .route("/", get(invoice_status))
        .route("/send", post(send_invoice))
}

pub async fn invoice_status(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let invoice = services.current_invoice().await;
    (
        StatusCode::OK,
        Json(serde_json::json!({ "invoice": invoice })),
    )
        .into_response()
}

pub async fn send_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::SendInvoiceRequest>,
) -> axum::response::Response {
    // Credentials are resolved at send time, never cached in app state.
    let config = match EmailConfig::from_env() {
        Ok(config) => config,
        Err(e) => return errors::service_error_to_response(ServiceError::Notify(e)),
    };

    match services.send_invoice(&body.recipient, config).await {
        Ok(artifact) => (
            StatusCode::OK,
            Json(serde_json::json!({ "invoice": artifact })),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
