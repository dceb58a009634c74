use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::{json, Value};
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use booking_cell::models::AddOrderRequest;
use booking_cell::services::AddOrderRequestValidator;
use shared_database::supabase::SupabaseClient;
use shared_utils::test_utils::{MockSupabaseResponses, TestConfig};

const PATIENT_ID: i64 = 1;
const DOCTOR_ID: i64 = 2;
const CLINIC_ID: i64 = 10;

fn validator_for(server: &MockServer) -> AddOrderRequestValidator {
    let config = TestConfig::with_store_url(&server.uri()).to_app_config();
    AddOrderRequestValidator::new(Arc::new(SupabaseClient::new(&config)))
}

fn valid_request() -> AddOrderRequest {
    let now = Utc::now();
    AddOrderRequest {
        start_time: now + Duration::hours(1),
        end_time: now + Duration::hours(2),
        patient_id: PATIENT_ID,
        doctor_id: DOCTOR_ID,
    }
}

async fn mount_patient_rows(server: &MockServer, rows: Value) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/patients"))
        .and(query_param("id", format!("eq.{}", PATIENT_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows))
        .mount(server)
        .await;
}

async fn mount_doctor_rows(server: &MockServer, rows: Value) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .and(query_param("id", format!("eq.{}", DOCTOR_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows))
        .mount(server)
        .await;
}

async fn mount_doctor_order_rows(server: &MockServer, rows: Value) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/orders"))
        .and(query_param("doctor_id", format!("eq.{}", DOCTOR_ID)))
        .and(query_param("is_cancelled", "eq.false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows))
        .mount(server)
        .await;
}

async fn mount_known_patient_and_doctor(server: &MockServer) {
    mount_patient_rows(server, json!([
        MockSupabaseResponses::patient_response(PATIENT_ID, CLINIC_ID, "patient@example.com")
    ])).await;
    mount_doctor_rows(server, json!([
        MockSupabaseResponses::doctor_response(DOCTOR_ID, "doctor@example.com")
    ])).await;
}

#[tokio::test]
async fn all_checks_pass_for_a_valid_request() {
    let server = MockServer::start().await;
    mount_known_patient_and_doctor(&server).await;
    mount_doctor_order_rows(&server, json!([])).await;

    let result = validator_for(&server).validate_request(&valid_request()).await.unwrap();

    assert!(result.passed_validation);
    assert!(result.errors.is_empty());
}

#[tokio::test]
async fn start_time_in_the_past_is_rejected() {
    let server = MockServer::start().await;

    let mut request = valid_request();
    request.start_time = Utc::now() - Duration::hours(1);

    let result = validator_for(&server).validate_request(&request).await.unwrap();

    assert!(!result.passed_validation);
    assert!(result.errors.contains(&"StartTime should be greater than current time".to_string()));
}

#[tokio::test]
async fn end_time_before_start_time_is_rejected() {
    let server = MockServer::start().await;

    let mut request = valid_request();
    request.end_time = request.start_time - Duration::minutes(30);

    let result = validator_for(&server).validate_request(&request).await.unwrap();

    assert!(!result.passed_validation);
    assert!(result.errors.contains(&"EndTime should be greater than StartTime".to_string()));
}

#[tokio::test]
async fn unknown_patient_is_rejected() {
    let server = MockServer::start().await;
    mount_patient_rows(&server, json!([])).await;

    let result = validator_for(&server).validate_request(&valid_request()).await.unwrap();

    assert!(!result.passed_validation);
    assert_eq!(result.first_error(), Some("A patient with that ID could not be found"));
}

#[tokio::test]
async fn unknown_doctor_is_rejected() {
    let server = MockServer::start().await;
    mount_patient_rows(&server, json!([
        MockSupabaseResponses::patient_response(PATIENT_ID, CLINIC_ID, "patient@example.com")
    ])).await;
    mount_doctor_rows(&server, json!([])).await;

    let result = validator_for(&server).validate_request(&valid_request()).await.unwrap();

    assert!(!result.passed_validation);
    assert_eq!(result.first_error(), Some("A doctor with that ID could not be found"));
}

#[tokio::test]
async fn overlapping_doctor_booking_is_rejected() {
    let server = MockServer::start().await;
    mount_known_patient_and_doctor(&server).await;

    let request = valid_request();
    let existing = MockSupabaseResponses::order_response(
        Uuid::new_v4(),
        99,
        DOCTOR_ID,
        request.start_time - Duration::minutes(30),
        request.start_time + Duration::minutes(30),
        "system_one",
        false,
    );
    mount_doctor_order_rows(&server, json!([existing])).await;

    let result = validator_for(&server).validate_request(&request).await.unwrap();

    assert!(!result.passed_validation);
    assert_eq!(result.first_error(), Some("A doctor is already scheduled for this time"));
}

#[tokio::test]
async fn non_overlapping_doctor_booking_is_accepted() {
    let server = MockServer::start().await;
    mount_known_patient_and_doctor(&server).await;

    let request = valid_request();
    let existing = MockSupabaseResponses::order_response(
        Uuid::new_v4(),
        99,
        DOCTOR_ID,
        request.end_time + Duration::hours(1),
        request.end_time + Duration::hours(2),
        "system_one",
        false,
    );
    mount_doctor_order_rows(&server, json!([existing])).await;

    let result = validator_for(&server).validate_request(&request).await.unwrap();

    assert!(result.passed_validation);
}

#[tokio::test]
async fn conflict_check_only_considers_non_cancelled_orders() {
    let server = MockServer::start().await;
    mount_known_patient_and_doctor(&server).await;

    // The store filters cancelled orders out server-side; the validator must
    // ask for that filter.
    Mock::given(method("GET"))
        .and(path("/rest/v1/orders"))
        .and(query_param("doctor_id", format!("eq.{}", DOCTOR_ID)))
        .and(query_param("is_cancelled", "eq.false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let result = validator_for(&server).validate_request(&valid_request()).await.unwrap();

    assert!(result.passed_validation);
}
