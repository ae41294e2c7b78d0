use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};

use atelier_core::{Money, PartId};
use atelier_inventory::{Category, Color, NewPart};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_parts).post(create_part))
        .route("/export", get(export_csv))
        .route("/low-stock", get(low_stock))
        .route("/:id", put(update_part))
}

pub async fn list_parts(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.list_parts().await {
        Ok(parts) => (StatusCode::OK, Json(parts)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn create_part(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreatePartRequest>,
) -> axum::response::Response {
    // Category/color arrive as labels and are validated here, at the
    // boundary; everything else is accepted as-is (no SKU uniqueness).
    let category: Category = match body.category.parse() {
        Ok(v) => v,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", e.to_string()),
    };
    let color: Color = match body.color.parse() {
        Ok(v) => v,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", e.to_string()),
    };

    let part = NewPart {
        part_number: body.part_number,
        name: body.name,
        category,
        color,
        qty: body.qty,
        cost: Money::from_cents(body.cost),
        price: Money::from_cents(body.price),
    };

    match services.create_part(part).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn update_part(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdatePartRequest>,
) -> axum::response::Response {
    let id: PartId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid part id"),
    };

    // An unknown id is a silent no-op by design; the response is the same.
    match services
        .update_part(
            id,
            body.qty,
            Money::from_cents(body.cost),
            Money::from_cents(body.price),
        )
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "id": id.to_string() })),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn export_csv(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.export_csv().await {
        Ok(csv) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"inventory.csv\"",
                ),
            ],
            csv,
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn low_stock(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.low_stock().await {
        Ok(parts) => (StatusCode::OK, Json(parts)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
