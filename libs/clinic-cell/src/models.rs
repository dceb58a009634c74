use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use std::fmt;

/// Clinic-level category stamped onto every order booked for one of the
/// clinic's patients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurgeryType {
    SystemOne,
    SystemTwo,
}

impl fmt::Display for SurgeryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurgeryType::SystemOne => write!(f, "system_one"),
            SurgeryType::SystemTwo => write!(f, "system_two"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clinic {
    pub id: i64,
    pub name: String,
    pub surgery_type: SurgeryType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClinicRequest {
    pub name: String,
    pub surgery_type: SurgeryType,
}

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum ClinicError {
    #[error("Clinic not found")]
    NotFound,

    #[error("Clinic with name {name} already exists")]
    NameAlreadyExists { name: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
