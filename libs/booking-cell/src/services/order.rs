use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info, warn};
use uuid::Uuid;
use std::sync::Arc;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;
use clinic_cell::models::SurgeryType;

use crate::models::{AddOrderRequest, GetOrderResponse, Order, OrderError};
use crate::services::validation::AddOrderRequestValidator;

pub struct OrderService {
    supabase: Arc<SupabaseClient>,
    validator: AddOrderRequestValidator,
}

impl OrderService {
    pub fn new(config: &AppConfig) -> Self {
        let supabase = Arc::new(SupabaseClient::new(config));
        let validator = AddOrderRequestValidator::new(Arc::clone(&supabase));

        Self { supabase, validator }
    }

    /// Book a doctor's time for a patient. The order is stamped with the
    /// surgery type of the patient's clinic as it is at booking time.
    pub async fn add_order(&self, request: AddOrderRequest) -> Result<Order, OrderError> {
        info!("Booking order for patient {} with doctor {}",
              request.patient_id, request.doctor_id);

        let validation = self.validator.validate_request(&request).await?;

        if !validation.passed_validation {
            let message = validation.first_error()
                .unwrap_or("Invalid booking request")
                .to_string();
            warn!("Booking rejected for patient {}: {}", request.patient_id, message);
            return Err(OrderError::ValidationFailed(message));
        }

        let surgery_type = self.get_patient_surgery_type(request.patient_id).await?;

        let now = Utc::now();
        let order_data = json!({
            "id": Uuid::new_v4(),
            "start_time": request.start_time.to_rfc3339(),
            "end_time": request.end_time.to_rfc3339(),
            "patient_id": request.patient_id,
            "doctor_id": request.doctor_id,
            "surgery_type": surgery_type.to_string(),
            "is_cancelled": false,
            "created_at": now.to_rfc3339(),
            "updated_at": now.to_rfc3339()
        });

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert("Prefer", reqwest::header::HeaderValue::from_static("return=representation"));

        let result: Vec<Value> = self.supabase.request_with_headers(
            Method::POST,
            "/rest/v1/orders",
            Some(order_data),
            Some(headers),
        ).await.map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        if result.is_empty() {
            return Err(OrderError::DatabaseError("Failed to create order".to_string()));
        }

        let order: Order = serde_json::from_value(result[0].clone())
            .map_err(|e| OrderError::DatabaseError(format!("Failed to parse created order: {}", e)))?;

        info!("Order {} booked for patient {} with doctor {}",
              order.id, order.patient_id, order.doctor_id);
        Ok(order)
    }

    /// Flip the cancelled flag on an order. No other field changes.
    pub async fn cancel_order(&self, order_id: Uuid) -> Result<Order, OrderError> {
        debug!("Cancelling order: {}", order_id);

        let update_data = json!({
            "is_cancelled": true,
            "updated_at": Utc::now().to_rfc3339()
        });

        let path = format!("/rest/v1/orders?id=eq.{}", order_id);
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert("Prefer", reqwest::header::HeaderValue::from_static("return=representation"));

        let result: Vec<Value> = self.supabase.request_with_headers(
            Method::PATCH,
            &path,
            Some(update_data),
            Some(headers),
        ).await.map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        if result.is_empty() {
            return Err(OrderError::NotFound);
        }

        let order: Order = serde_json::from_value(result[0].clone())
            .map_err(|e| OrderError::DatabaseError(format!("Failed to parse cancelled order: {}", e)))?;

        info!("Order {} cancelled", order.id);
        Ok(order)
    }

    /// Earliest non-cancelled order for the patient that starts in the
    /// future; `None` when the patient has nothing booked.
    pub async fn get_patient_next_order(&self, patient_id: i64) -> Result<Option<GetOrderResponse>, OrderError> {
        debug!("Fetching next order for patient: {}", patient_id);

        let utc_now = Utc::now().to_rfc3339();
        let encoded_now = urlencoding::encode(&utc_now);
        let path = format!(
            "/rest/v1/orders?patient_id=eq.{}&is_cancelled=eq.false&start_time=gt.{}&order=start_time.asc&limit=1",
            patient_id, encoded_now
        );

        let result: Vec<Value> = self.supabase.request(
            Method::GET,
            &path,
            None,
        ).await.map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        if result.is_empty() {
            return Ok(None);
        }

        let order: Order = serde_json::from_value(result[0].clone())
            .map_err(|e| OrderError::DatabaseError(format!("Failed to parse order: {}", e)))?;

        Ok(Some(GetOrderResponse::from(order)))
    }

    async fn get_patient_surgery_type(&self, patient_id: i64) -> Result<SurgeryType, OrderError> {
        let patient_path = format!("/rest/v1/patients?id=eq.{}", patient_id);
        let patients: Vec<Value> = self.supabase.request(
            Method::GET,
            &patient_path,
            None,
        ).await.map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        if patients.is_empty() {
            return Err(OrderError::DatabaseError("Patient record disappeared during booking".to_string()));
        }

        let clinic_id = patients[0]["clinic_id"].as_i64()
            .ok_or_else(|| OrderError::DatabaseError("Patient record has no clinic reference".to_string()))?;

        let clinic_path = format!("/rest/v1/clinics?id=eq.{}", clinic_id);
        let clinics: Vec<Value> = self.supabase.request(
            Method::GET,
            &clinic_path,
            None,
        ).await.map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        if clinics.is_empty() {
            return Err(OrderError::ClinicNotFound);
        }

        let surgery_type: SurgeryType = serde_json::from_value(clinics[0]["surgery_type"].clone())
            .map_err(|e| OrderError::DatabaseError(format!("Failed to parse surgery type: {}", e)))?;

        Ok(surgery_type)
    }
}
