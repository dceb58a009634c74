use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;
use chrono::Utc;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;
use shared_utils::validation::is_valid_email_address;

use crate::models::{CreateDoctorRequest, Doctor, DoctorError};

pub struct DoctorService {
    supabase: SupabaseClient,
}

impl DoctorService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    pub async fn create_doctor(&self, request: CreateDoctorRequest) -> Result<Doctor, DoctorError> {
        debug!("Registering doctor: {}", request.email);

        if request.first_name.trim().is_empty() {
            return Err(DoctorError::ValidationError("Did not provide a FirstName".to_string()));
        }
        if request.last_name.trim().is_empty() {
            return Err(DoctorError::ValidationError("Did not provide a LastName".to_string()));
        }
        if !is_valid_email_address(&request.email) {
            return Err(DoctorError::ValidationError("Email must be a valid email address".to_string()));
        }

        let existing_check_path = format!(
            "/rest/v1/doctors?email=eq.{}",
            urlencoding::encode(&request.email)
        );
        let existing: Vec<Value> = self.supabase.request(
            Method::GET,
            &existing_check_path,
            None,
        ).await.map_err(|e| DoctorError::DatabaseError(e.to_string()))?;

        if !existing.is_empty() {
            return Err(DoctorError::EmailAlreadyExists { email: request.email });
        }

        let now = Utc::now();
        let doctor_data = json!({
            "first_name": request.first_name,
            "last_name": request.last_name,
            "email": request.email,
            "created_at": now.to_rfc3339(),
            "updated_at": now.to_rfc3339()
        });

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert("Prefer", reqwest::header::HeaderValue::from_static("return=representation"));

        let result: Vec<Value> = self.supabase.request_with_headers(
            Method::POST,
            "/rest/v1/doctors",
            Some(doctor_data),
            Some(headers),
        ).await.map_err(|e| DoctorError::DatabaseError(e.to_string()))?;

        if result.is_empty() {
            return Err(DoctorError::DatabaseError("Failed to register doctor".to_string()));
        }

        let doctor: Doctor = serde_json::from_value(result[0].clone())
            .map_err(|e| DoctorError::DatabaseError(format!("Failed to parse doctor: {}", e)))?;

        debug!("Doctor registered with ID: {}", doctor.id);
        Ok(doctor)
    }

    pub async fn get_doctor(&self, doctor_id: i64) -> Result<Doctor, DoctorError> {
        debug!("Fetching doctor: {}", doctor_id);

        let path = format!("/rest/v1/doctors?id=eq.{}", doctor_id);
        let result: Vec<Value> = self.supabase.request(
            Method::GET,
            &path,
            None,
        ).await.map_err(|e| DoctorError::DatabaseError(e.to_string()))?;

        if result.is_empty() {
            return Err(DoctorError::NotFound);
        }

        let doctor: Doctor = serde_json::from_value(result[0].clone())
            .map_err(|e| DoctorError::DatabaseError(format!("Failed to parse doctor: {}", e)))?;

        Ok(doctor)
    }
}
