use axum::Router;

pub mod invoice;
pub mod parts;
pub mod pull_list;

pub fn router() -> Router {
    Router::new()
        .nest("/parts", parts::router())
        .nest("/pull-list", pull_list::router())
        .nest("/invoice", invoice::router())
}
