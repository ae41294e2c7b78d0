use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use atelier_core::DomainError;
use atelier_inventory::StoreError;

use crate::app::services::ServiceError;

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Domain(DomainError::Validation(msg)) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        ServiceError::Domain(DomainError::InvalidId(msg)) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_id", msg)
        }
        ServiceError::Domain(DomainError::NotFound) => {
            json_error(StatusCode::NOT_FOUND, "not_found", "not found")
        }
        ServiceError::Domain(DomainError::Conflict(msg)) => {
            json_error(StatusCode::CONFLICT, "conflict", msg)
        }
        ServiceError::Domain(DomainError::InvariantViolation(msg)) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", msg)
        }
        ServiceError::Store(StoreError::MissingPart(id)) => json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "missing_part",
            format!("part {id} does not exist"),
        ),
        ServiceError::Store(e) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "store_error",
            e.to_string(),
        ),
        ServiceError::Report(e) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "report_error",
            e.to_string(),
        ),
        ServiceError::Export(e) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "export_error",
            e.to_string(),
        ),
        // Email failures surface as a message and leave the invoice
        // retryable; they are a gateway problem, not a server bug.
        ServiceError::Notify(e) => json_error(
            StatusCode::BAD_GATEWAY,
            "email_failed",
            format!("Email failed: {e}"),
        ),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
