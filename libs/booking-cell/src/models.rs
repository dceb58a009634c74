use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

use clinic_cell::models::SurgeryType;

// ==============================================================================
// CORE ORDER MODELS
// ==============================================================================

/// A booking of a doctor's time for a patient. Orders are never physically
/// deleted; cancellation only flips `is_cancelled`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub surgery_type: SurgeryType,
    pub is_cancelled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddOrderRequest {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub patient_id: i64,
    pub doctor_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetOrderResponse {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub surgery_type: SurgeryType,
}

impl From<Order> for GetOrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            start_time: order.start_time,
            end_time: order.end_time,
            patient_id: order.patient_id,
            doctor_id: order.doctor_id,
            surgery_type: order.surgery_type,
        }
    }
}

// ==============================================================================
// VALIDATION MODELS
// ==============================================================================

/// Outcome of the add-order checks. The first entry in `errors` is what the
/// caller sees on a 400.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    pub passed_validation: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn passed() -> Self {
        Self {
            passed_validation: true,
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, message: &str) {
        self.passed_validation = false;
        self.errors.push(message.to_string());
    }

    pub fn first_error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum OrderError {
    #[error("Order not found")]
    NotFound,

    #[error("Validation error: {0}")]
    ValidationFailed(String),

    #[error("A clinic with that ID could not be found")]
    ClinicNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
