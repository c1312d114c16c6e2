pub mod handlers;

pub use handlers::{health_check, lookup_client, retry_lookup};

use crate::service::LookupService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// 构建路由
pub fn router(service: Arc<LookupService>) -> Router {
    let lookup_routes = Router::new()
        .route("/api/lookup/client", post(lookup_client))
        .route("/api/lookup/retry", post(retry_lookup))
        .with_state(service);

    Router::new()
        .route("/health", get(health_check))
        .merge(lookup_routes)
}
