use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;

pub struct TestConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: "test-anon-key".to_string(),
        }
    }
}

impl TestConfig {
    pub fn with_store_url(url: &str) -> Self {
        Self {
            supabase_url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_anon_key: self.supabase_anon_key.clone(),
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

/// Canned PostgREST rows for the booking tables, shaped like the store
/// returns them.
pub struct MockSupabaseResponses;

impl MockSupabaseResponses {
    pub fn clinic_response(id: i64, name: &str, surgery_type: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "surgery_type": surgery_type,
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-01T00:00:00Z"
        })
    }

    pub fn patient_response(id: i64, clinic_id: i64, email: &str) -> Value {
        json!({
            "id": id,
            "first_name": "Test",
            "last_name": "Patient",
            "email": email,
            "clinic_id": clinic_id,
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-01T00:00:00Z"
        })
    }

    pub fn doctor_response(id: i64, email: &str) -> Value {
        json!({
            "id": id,
            "first_name": "Test",
            "last_name": "Doctor",
            "email": email,
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-01T00:00:00Z"
        })
    }

    pub fn order_response(
        id: Uuid,
        patient_id: i64,
        doctor_id: i64,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        surgery_type: &str,
        is_cancelled: bool,
    ) -> Value {
        json!({
            "id": id,
            "start_time": start_time.to_rfc3339(),
            "end_time": end_time.to_rfc3339(),
            "patient_id": patient_id,
            "doctor_id": doctor_id,
            "surgery_type": surgery_type,
            "is_cancelled": is_cancelled,
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-01T00:00:00Z"
        })
    }

    pub fn error_response(message: &str, code: &str) -> Value {
        json!({
            "error": {
                "message": message,
                "code": code
            }
        })
    }
}
