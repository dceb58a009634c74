use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
};

use shared_config::AppConfig;

use crate::handlers;

pub fn booking_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", post(handlers::add_booking))
        .route("/patient/{patient_id}/next", get(handlers::get_patient_next_appointment))
        .route("/{order_id}", delete(handlers::cancel_booking))
        .with_state(state)
}
