use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use shared_config::AppConfig;

use crate::handlers;

pub fn clinic_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", post(handlers::create_clinic))
        .route("/{clinic_id}", get(handlers::get_clinic))
        .with_state(state)
}
