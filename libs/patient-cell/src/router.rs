use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use shared_config::AppConfig;

use crate::handlers;

pub fn patient_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", post(handlers::create_patient))
        .route("/{patient_id}", get(handlers::get_patient))
        .with_state(state)
}
