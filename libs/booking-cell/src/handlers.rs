use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{AddOrderRequest, OrderError};
use crate::services::OrderService;

#[axum::debug_handler]
pub async fn add_booking(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<AddOrderRequest>,
) -> Result<Json<Value>, AppError> {
    let service = OrderService::new(&state);

    let order = service.add_order(request).await
        .map_err(|e| match e {
            OrderError::ValidationFailed(msg) => AppError::BadRequest(msg),
            OrderError::DatabaseError(msg) => AppError::Database(msg),
            _ => AppError::Internal(e.to_string()),
        })?;

    Ok(Json(json!({
        "success": true,
        "order": order,
        "message": "Booking created successfully"
    })))
}

#[axum::debug_handler]
pub async fn get_patient_next_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(patient_id): Path<i64>,
) -> Result<Response, AppError> {
    let service = OrderService::new(&state);

    let next = service.get_patient_next_order(patient_id).await
        .map_err(|e| match e {
            OrderError::DatabaseError(msg) => AppError::Database(msg),
            _ => AppError::Internal(e.to_string()),
        })?;

    match next {
        Some(order) => Ok(Json(json!(order)).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

#[axum::debug_handler]
pub async fn cancel_booking(
    State(state): State<Arc<AppConfig>>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = OrderService::new(&state);

    let order = service.cancel_order(order_id).await
        .map_err(|e| match e {
            OrderError::NotFound => AppError::NotFound("Booking not found".to_string()),
            OrderError::DatabaseError(msg) => AppError::Database(msg),
            _ => AppError::Internal(e.to_string()),
        })?;

    Ok(Json(json!({
        "success": true,
        "order": order,
        "message": "Booking cancelled successfully"
    })))
}
