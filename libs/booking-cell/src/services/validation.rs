use chrono::{DateTime, Utc};
use reqwest::Method;
use serde_json::Value;
use tracing::warn;

use std::sync::Arc;
use shared_database::supabase::SupabaseClient;

use crate::models::{AddOrderRequest, Order, OrderError, ValidationResult};

pub struct AddOrderRequestValidator {
    supabase: Arc<SupabaseClient>,
}

impl AddOrderRequestValidator {
    pub fn new(supabase: Arc<SupabaseClient>) -> Self {
        Self { supabase }
    }

    /// Run the add-order checks in sequence, stopping at the first failing
    /// class of check.
    pub async fn validate_request(&self, request: &AddOrderRequest) -> Result<ValidationResult, OrderError> {
        let mut result = ValidationResult::passed();

        if self.order_times_invalid(request, &mut result) {
            return Ok(result);
        }

        if self.patient_not_found(request, &mut result).await? {
            return Ok(result);
        }

        if self.doctor_not_found(request, &mut result).await? {
            return Ok(result);
        }

        if self.doctor_already_scheduled(request, &mut result).await? {
            return Ok(result);
        }

        Ok(result)
    }

    fn order_times_invalid(&self, request: &AddOrderRequest, result: &mut ValidationResult) -> bool {
        if request.start_time <= Utc::now() {
            result.add_error("StartTime should be greater than current time");
        }

        if request.end_time <= request.start_time {
            result.add_error("EndTime should be greater than StartTime");
        }

        !result.passed_validation
    }

    async fn patient_not_found(
        &self,
        request: &AddOrderRequest,
        result: &mut ValidationResult,
    ) -> Result<bool, OrderError> {
        let path = format!("/rest/v1/patients?id=eq.{}&limit=1", request.patient_id);
        let matches: Vec<Value> = self.supabase.request(
            Method::GET,
            &path,
            None,
        ).await.map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        if matches.is_empty() {
            result.add_error("A patient with that ID could not be found");
            return Ok(true);
        }

        Ok(false)
    }

    async fn doctor_not_found(
        &self,
        request: &AddOrderRequest,
        result: &mut ValidationResult,
    ) -> Result<bool, OrderError> {
        let path = format!("/rest/v1/doctors?id=eq.{}&limit=1", request.doctor_id);
        let matches: Vec<Value> = self.supabase.request(
            Method::GET,
            &path,
            None,
        ).await.map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        if matches.is_empty() {
            result.add_error("A doctor with that ID could not be found");
            return Ok(true);
        }

        Ok(false)
    }

    /// Cancelled orders do not hold the slot.
    async fn doctor_already_scheduled(
        &self,
        request: &AddOrderRequest,
        result: &mut ValidationResult,
    ) -> Result<bool, OrderError> {
        let path = format!(
            "/rest/v1/orders?doctor_id=eq.{}&is_cancelled=eq.false",
            request.doctor_id
        );
        let existing: Vec<Order> = self.supabase.request(
            Method::GET,
            &path,
            None,
        ).await.map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        let conflict = existing.iter().any(|order| {
            ranges_overlap(request.start_time, request.end_time, order.start_time, order.end_time)
        });

        if conflict {
            warn!("Doctor {} already scheduled between {} and {}",
                  request.doctor_id, request.start_time, request.end_time);
            result.add_error("A doctor is already scheduled for this time");
            return Ok(true);
        }

        Ok(false)
    }
}

fn ranges_overlap(
    new_start: DateTime<Utc>,
    new_end: DateTime<Utc>,
    existing_start: DateTime<Utc>,
    existing_end: DateTime<Utc>,
) -> bool {
    !(new_end < existing_start || new_start > existing_end)
}
