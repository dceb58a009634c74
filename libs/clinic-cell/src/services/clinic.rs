use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;
use chrono::Utc;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{Clinic, ClinicError, CreateClinicRequest};

pub struct ClinicService {
    supabase: SupabaseClient,
}

impl ClinicService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    pub async fn create_clinic(&self, request: CreateClinicRequest) -> Result<Clinic, ClinicError> {
        debug!("Registering clinic: {}", request.name);

        if request.name.trim().is_empty() {
            return Err(ClinicError::ValidationError("Did not provide a Name".to_string()));
        }

        // Clinic names are unique across the practice
        let existing_check_path = format!(
            "/rest/v1/clinics?name=eq.{}",
            urlencoding::encode(&request.name)
        );
        let existing: Vec<Value> = self.supabase.request(
            Method::GET,
            &existing_check_path,
            None,
        ).await.map_err(|e| ClinicError::DatabaseError(e.to_string()))?;

        if !existing.is_empty() {
            return Err(ClinicError::NameAlreadyExists { name: request.name });
        }

        let now = Utc::now();
        let clinic_data = json!({
            "name": request.name,
            "surgery_type": request.surgery_type.to_string(),
            "created_at": now.to_rfc3339(),
            "updated_at": now.to_rfc3339()
        });

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert("Prefer", reqwest::header::HeaderValue::from_static("return=representation"));

        let result: Vec<Value> = self.supabase.request_with_headers(
            Method::POST,
            "/rest/v1/clinics",
            Some(clinic_data),
            Some(headers),
        ).await.map_err(|e| ClinicError::DatabaseError(e.to_string()))?;

        if result.is_empty() {
            return Err(ClinicError::DatabaseError("Failed to register clinic".to_string()));
        }

        let clinic: Clinic = serde_json::from_value(result[0].clone())
            .map_err(|e| ClinicError::DatabaseError(format!("Failed to parse clinic: {}", e)))?;

        debug!("Clinic registered with ID: {}", clinic.id);
        Ok(clinic)
    }

    pub async fn get_clinic(&self, clinic_id: i64) -> Result<Clinic, ClinicError> {
        debug!("Fetching clinic: {}", clinic_id);

        let path = format!("/rest/v1/clinics?id=eq.{}", clinic_id);
        let result: Vec<Value> = self.supabase.request(
            Method::GET,
            &path,
            None,
        ).await.map_err(|e| ClinicError::DatabaseError(e.to_string()))?;

        if result.is_empty() {
            return Err(ClinicError::NotFound);
        }

        let clinic: Clinic = serde_json::from_value(result[0].clone())
            .map_err(|e| ClinicError::DatabaseError(format!("Failed to parse clinic: {}", e)))?;

        Ok(clinic)
    }
}
