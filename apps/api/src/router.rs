use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use prakriti_cell::router::prakriti_routes;
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "Prakriti Assessment API is running!" }))
        .nest("/prakriti", prakriti_routes(state.clone()))
}
