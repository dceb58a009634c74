use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{ClinicError, CreateClinicRequest};
use crate::services::ClinicService;

#[axum::debug_handler]
pub async fn create_clinic(
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<CreateClinicRequest>,
) -> Result<Json<Value>, AppError> {
    let service = ClinicService::new(&config);

    let clinic = service.create_clinic(request).await
        .map_err(|e| match e {
            ClinicError::ValidationError(msg) => AppError::BadRequest(msg),
            ClinicError::NameAlreadyExists { .. } => AppError::BadRequest(e.to_string()),
            ClinicError::DatabaseError(msg) => AppError::Database(msg),
            _ => AppError::Internal(e.to_string()),
        })?;

    Ok(Json(json!(clinic)))
}

#[axum::debug_handler]
pub async fn get_clinic(
    State(config): State<Arc<AppConfig>>,
    Path(clinic_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = ClinicService::new(&config);

    let clinic = service.get_clinic(clinic_id).await
        .map_err(|e| match e {
            ClinicError::NotFound => AppError::NotFound("Clinic not found".to_string()),
            ClinicError::DatabaseError(msg) => AppError::Database(msg),
            _ => AppError::Internal(e.to_string()),
        })?;

    Ok(Json(json!(clinic)))
}
