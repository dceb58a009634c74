use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{CreateDoctorRequest, DoctorError};
use crate::services::DoctorService;

#[axum::debug_handler]
pub async fn create_doctor(
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<CreateDoctorRequest>,
) -> Result<Json<Value>, AppError> {
    let service = DoctorService::new(&config);

    let doctor = service.create_doctor(request).await
        .map_err(|e| match e {
            DoctorError::ValidationError(msg) => AppError::BadRequest(msg),
            DoctorError::EmailAlreadyExists { .. } => AppError::BadRequest(e.to_string()),
            DoctorError::DatabaseError(msg) => AppError::Database(msg),
            _ => AppError::Internal(e.to_string()),
        })?;

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(config): State<Arc<AppConfig>>,
    Path(doctor_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = DoctorService::new(&config);

    let doctor = service.get_doctor(doctor_id).await
        .map_err(|e| match e {
            DoctorError::NotFound => AppError::NotFound("Doctor not found".to_string()),
            DoctorError::DatabaseError(msg) => AppError::Database(msg),
            _ => AppError::Internal(e.to_string()),
        })?;

    Ok(Json(json!(doctor)))
}
