use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use booking_cell::router::booking_routes;
use clinic_cell::router::clinic_routes;
use doctor_cell::router::doctor_routes;
use patient_cell::router::patient_routes;
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "Patient Booking API is running!" }))
        .nest("/booking", booking_routes(state.clone()))
        .nest("/clinics", clinic_routes(state.clone()))
        .nest("/doctors", doctor_routes(state.clone()))
        .nest("/patients", patient_routes(state))
}
