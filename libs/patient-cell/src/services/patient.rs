use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;
use chrono::Utc;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;
use shared_utils::validation::is_valid_email_address;

use crate::models::{CreatePatientRequest, Patient, PatientError};

pub struct PatientService {
    supabase: SupabaseClient,
}

impl PatientService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    pub async fn create_patient(&self, request: CreatePatientRequest) -> Result<Patient, PatientError> {
        debug!("Registering patient: {}", request.email);

        if request.first_name.trim().is_empty() {
            return Err(PatientError::ValidationError("Did not provide a FirstName".to_string()));
        }
        if request.last_name.trim().is_empty() {
            return Err(PatientError::ValidationError("Did not provide a LastName".to_string()));
        }
        if !is_valid_email_address(&request.email) {
            return Err(PatientError::ValidationError("Email must be a valid email address".to_string()));
        }

        let existing_check_path = format!(
            "/rest/v1/patients?email=eq.{}",
            urlencoding::encode(&request.email)
        );
        let existing: Vec<Value> = self.supabase.request(
            Method::GET,
            &existing_check_path,
            None,
        ).await.map_err(|e| PatientError::DatabaseError(e.to_string()))?;

        if !existing.is_empty() {
            return Err(PatientError::EmailAlreadyExists { email: request.email });
        }

        // A patient belongs to exactly one clinic
        let clinic_path = format!("/rest/v1/clinics?id=eq.{}", request.clinic_id);
        let clinics: Vec<Value> = self.supabase.request(
            Method::GET,
            &clinic_path,
            None,
        ).await.map_err(|e| PatientError::DatabaseError(e.to_string()))?;

        if clinics.is_empty() {
            return Err(PatientError::ClinicNotFound);
        }

        let now = Utc::now();
        let patient_data = json!({
            "first_name": request.first_name,
            "last_name": request.last_name,
            "email": request.email,
            "clinic_id": request.clinic_id,
            "created_at": now.to_rfc3339(),
            "updated_at": now.to_rfc3339()
        });

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert("Prefer", reqwest::header::HeaderValue::from_static("return=representation"));

        let result: Vec<Value> = self.supabase.request_with_headers(
            Method::POST,
            "/rest/v1/patients",
            Some(patient_data),
            Some(headers),
        ).await.map_err(|e| PatientError::DatabaseError(e.to_string()))?;

        if result.is_empty() {
            return Err(PatientError::DatabaseError("Failed to register patient".to_string()));
        }

        let patient: Patient = serde_json::from_value(result[0].clone())
            .map_err(|e| PatientError::DatabaseError(format!("Failed to parse patient: {}", e)))?;

        debug!("Patient registered with ID: {}", patient.id);
        Ok(patient)
    }

    pub async fn get_patient(&self, patient_id: i64) -> Result<Patient, PatientError> {
        debug!("Fetching patient: {}", patient_id);

        let path = format!("/rest/v1/patients?id=eq.{}", patient_id);
        let result: Vec<Value> = self.supabase.request(
            Method::GET,
            &path,
            None,
        ).await.map_err(|e| PatientError::DatabaseError(e.to_string()))?;

        if result.is_empty() {
            return Err(PatientError::NotFound);
        }

        let patient: Patient = serde_json::from_value(result[0].clone())
            .map_err(|e| PatientError::DatabaseError(format!("Failed to parse patient: {}", e)))?;

        Ok(patient)
    }
}
