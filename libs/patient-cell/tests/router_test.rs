use std::sync::Arc;

use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use patient_cell::{create_patient_router, PatientService};
use shared_database::Table;
use shared_utils::test_utils::{json_request, read_json};

fn create_test_app() -> axum::Router {
    create_patient_router(Arc::new(PatientService::new(Arc::new(Table::new("patients")))))
}

fn patient_body() -> serde_json::Value {
    json!({
        "mobileno": "9876543210",
        "name": "Ravi Kumar",
        "age": 42,
        "pincode": 560034,
        "gender": "M"
    })
}

#[tokio::test]
async fn test_register_then_fetch() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(json_request(Method::POST, "/patients", Some(patient_body())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(json_request(Method::GET, "/patients/9876543210", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["name"], "Ravi Kumar");
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let app = create_test_app();

    app.clone()
        .oneshot(json_request(Method::POST, "/patients", Some(patient_body())))
        .await
        .unwrap();
    let response = app
        .oneshot(json_request(Method::POST, "/patients", Some(patient_body())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_unknown_patient() {
    let app = create_test_app();

    let response = app
        .oneshot(json_request(Method::PUT, "/patients/1111111111", Some(json!({ "age": 30 }))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(response).await["error"], "Patient not found");
}
