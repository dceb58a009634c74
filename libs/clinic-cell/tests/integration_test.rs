use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use clinic_cell::models::{ClinicError, CreateClinicRequest, SurgeryType};
use clinic_cell::services::ClinicService;
use shared_utils::test_utils::{MockSupabaseResponses, TestConfig};

const CLINIC_ID: i64 = 10;

fn service_for(server: &MockServer) -> ClinicService {
    let config = TestConfig::with_store_url(&server.uri()).to_app_config();
    ClinicService::new(&config)
}

#[tokio::test]
async fn create_clinic_registers_a_new_clinic() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/clinics"))
        .and(query_param("name", "eq.Greenfield"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/clinics"))
        .and(body_partial_json(json!({ "name": "Greenfield", "surgery_type": "system_one" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockSupabaseResponses::clinic_response(CLINIC_ID, "Greenfield", "system_one")
        ])))
        .mount(&server)
        .await;

    let request = CreateClinicRequest {
        name: "Greenfield".to_string(),
        surgery_type: SurgeryType::SystemOne,
    };
    let clinic = service_for(&server).create_clinic(request).await.unwrap();

    assert_eq!(clinic.id, CLINIC_ID);
    assert_eq!(clinic.name, "Greenfield");
    assert_eq!(clinic.surgery_type, SurgeryType::SystemOne);
}

#[tokio::test]
async fn create_clinic_rejects_an_empty_name() {
    let server = MockServer::start().await;

    let request = CreateClinicRequest {
        name: "   ".to_string(),
        surgery_type: SurgeryType::SystemTwo,
    };
    let err = service_for(&server).create_clinic(request).await.unwrap_err();

    assert_matches!(err, ClinicError::ValidationError(msg) => {
        assert_eq!(msg, "Did not provide a Name");
    });
}

#[tokio::test]
async fn create_clinic_rejects_a_duplicate_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/clinics"))
        .and(query_param("name", "eq.Greenfield"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::clinic_response(CLINIC_ID, "Greenfield", "system_one")
        ])))
        .mount(&server)
        .await;

    let request = CreateClinicRequest {
        name: "Greenfield".to_string(),
        surgery_type: SurgeryType::SystemOne,
    };
    let err = service_for(&server).create_clinic(request).await.unwrap_err();

    assert_matches!(err, ClinicError::NameAlreadyExists { name } => {
        assert_eq!(name, "Greenfield");
    });
}

#[tokio::test]
async fn get_clinic_returns_the_stored_row() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/clinics"))
        .and(query_param("id", format!("eq.{}", CLINIC_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::clinic_response(CLINIC_ID, "Greenfield", "system_two")
        ])))
        .mount(&server)
        .await;

    let clinic = service_for(&server).get_clinic(CLINIC_ID).await.unwrap();

    assert_eq!(clinic.id, CLINIC_ID);
    assert_eq!(clinic.surgery_type, SurgeryType::SystemTwo);
}

#[tokio::test]
async fn get_clinic_with_unknown_id_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/clinics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let err = service_for(&server).get_clinic(404).await.unwrap_err();

    assert_matches!(err, ClinicError::NotFound);
}
