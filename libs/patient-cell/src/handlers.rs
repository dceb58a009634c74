use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{CreatePatientRequest, PatientError};
use crate::services::PatientService;

#[axum::debug_handler]
pub async fn create_patient(
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<CreatePatientRequest>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(&config);

    let patient = service.create_patient(request).await
        .map_err(|e| match e {
            PatientError::ValidationError(msg) => AppError::BadRequest(msg),
            PatientError::EmailAlreadyExists { .. } => AppError::BadRequest(e.to_string()),
            PatientError::ClinicNotFound => AppError::BadRequest(e.to_string()),
            PatientError::DatabaseError(msg) => AppError::Database(msg),
            _ => AppError::Internal(e.to_string()),
        })?;

    Ok(Json(json!(patient)))
}

#[axum::debug_handler]
pub async fn get_patient(
    State(config): State<Arc<AppConfig>>,
    Path(patient_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(&config);

    let patient = service.get_patient(patient_id).await
        .map_err(|e| match e {
            PatientError::NotFound => AppError::NotFound("Patient not found".to_string()),
            PatientError::DatabaseError(msg) => AppError::Database(msg),
            _ => AppError::Internal(e.to_string()),
        })?;

    Ok(Json(json!(patient)))
}
