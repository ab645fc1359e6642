use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;

use crate::handlers;

pub fn prakriti_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/questions", get(handlers::get_questions))
        .route("/score", post(handlers::score_assessment))
        .with_state(state)
}
