//! Application assembly: services in an `Extension`, one router per view.

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{Extension, Router};

pub use services::{AppServices, ServiceError};

pub fn build_app(services: Arc<AppServices>) -> Router {
    routes::router().layer(Extension(services))
}
