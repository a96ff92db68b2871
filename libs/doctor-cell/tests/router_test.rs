use std::sync::Arc;

use axum::{
    http::{Method, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use doctor_cell::{doctor_routes, AssociationService, DoctorService, DoctorState};
use facility_cell::Hospital;
use shared_database::Table;
use shared_utils::test_utils::{json_request, read_json};

fn create_test_app() -> Router {
    let doctors = Arc::new(Table::new("doctors"));
    let specializations = Arc::new(Table::new("specializations"));
    let hospitals = Arc::new(Table::with_rows(
        "hospitals",
        vec![Hospital {
            hospital_id: "H1".into(),
            hospital_name: "City Care".into(),
            location: "Bangalore".into(),
            address: None,
            pincode: Some(560001),
            latitude: Some(12.9716),
            longitude: Some(77.5946),
            contact: "080".into(),
            working_hours: "24/7".into(),
        }],
    ));

    let state = DoctorState {
        doctors: Arc::new(DoctorService::new(doctors.clone(), specializations.clone())),
        associations: Arc::new(AssociationService::new(
            Arc::new(Table::new("associations")),
            doctors,
            hospitals,
            specializations,
        )),
    };

    doctor_routes(state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(json_request(method, uri, body)).await.unwrap();
    let status = response.status();
    (status, read_json(response).await)
}

async fn seed_doctor_and_specialization(app: &Router) {
    let (status, _) = send(app, Method::POST, "/doctors", Some(json!({
        "doctor_name": "Dr. Meera Rao",
        "experience": 12
    })))
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(app, Method::POST, "/specializations", Some(json!({
        "specialization_name": "Cardiology"
    })))
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

fn invitation() -> Value {
    json!({
        "doctor_id": "DR1",
        "hospital_id": "H1",
        "specialization_id": "SP1",
        "fees": "500",
        "working_hours": "9AM-5PM"
    })
}

#[tokio::test]
async fn test_invite_accept_toggle() {
    let app = create_test_app();
    seed_doctor_and_specialization(&app).await;

    let (status, invited) = send(&app, Method::POST, "/associations", Some(invitation())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(invited["doctor_instance_id"], "DH1");
    assert_eq!(invited["is_accepted"], false);

    let (_, pending) = send(&app, Method::GET, "/associations?doctor_id=DR1&pending=true", None).await;
    assert_eq!(pending["total"], 1);

    let (status, accepted) = send(
        &app,
        Method::POST,
        "/associations/DH1/respond",
        Some(json!({ "accept": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(accepted["status"], "accepted");
    assert_eq!(accepted["association"]["is_accepted"], true);

    let (_, toggled) = send(&app, Method::POST, "/associations/DH1/toggle-availability", None).await;
    assert_eq!(toggled["is_available"], false);

    let (_, by_specialization) = send(&app, Method::GET, "/associations?specialization_id=SP1", None).await;
    assert_eq!(by_specialization["total"], 1);
}

#[tokio::test]
async fn test_reject_removes_invitation() {
    let app = create_test_app();
    seed_doctor_and_specialization(&app).await;
    send(&app, Method::POST, "/associations", Some(invitation())).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/associations/DH1/respond",
        Some(json!({ "accept": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "rejected");

    let (status, _) = send(&app, Method::GET, "/associations/DH1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invite_unknown_references() {
    let app = create_test_app();
    seed_doctor_and_specialization(&app).await;

    let mut request = invitation();
    request["hospital_id"] = json!("H404");
    let (status, body) = send(&app, Method::POST, "/associations", Some(request)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Hospital not found");

    send(&app, Method::POST, "/associations", Some(invitation())).await;
    let (status, _) = send(&app, Method::POST, "/associations", Some(invitation())).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_unknown_doctor() {
    let app = create_test_app();

    let (status, body) = send(&app, Method::GET, "/doctors/DR99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Doctor not found");
}
