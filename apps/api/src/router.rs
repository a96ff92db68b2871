use std::sync::Arc;

use axum::{routing::get, Router};

use appointment_cell::{appointment_routes, BookingService};
use doctor_cell::{doctor_routes, AssociationService, DoctorService, DoctorState};
use facility_cell::{facility_routes, FacilityService};
use inventory_cell::{inventory_routes, InventoryService};
use patient_cell::{create_patient_router, PatientService};
use shared_config::AppConfig;
use shared_database::Table;

/// Builds the in-memory tables, wires each cell's service to them and nests
/// every cell under `/api`.
pub fn create_router(config: Arc<AppConfig>) -> Router {
    let hospitals = Arc::new(Table::new("hospitals"));
    let pharmacies = Arc::new(Table::new("pharmacies"));
    let doctors = Arc::new(Table::new("doctors"));
    let specializations = Arc::new(Table::new("specializations"));
    let associations = Arc::new(Table::new("doctor_hospitals"));
    let patients = Arc::new(Table::new("patients"));
    let appointments = Arc::new(Table::new("appointments"));

    let facilities = FacilityService::new(hospitals.clone(), pharmacies.clone());
    let doctor_state = DoctorState {
        doctors: Arc::new(DoctorService::new(doctors.clone(), specializations.clone())),
        associations: Arc::new(AssociationService::new(
            associations.clone(),
            doctors,
            hospitals,
            specializations,
        )),
    };
    let patient_service = PatientService::new(patients.clone());
    let booking = BookingService::new(&config, appointments, associations, patients);
    let inventory = InventoryService::new(
        Arc::new(Table::new("medicines")),
        Arc::new(Table::new("manufacturers")),
        Arc::new(Table::new("pharmacy_medicines")),
        pharmacies,
    );

    let api = Router::new()
        .merge(facility_routes(Arc::new(facilities)))
        .merge(doctor_routes(doctor_state))
        .merge(create_patient_router(Arc::new(patient_service)))
        .merge(appointment_routes(Arc::new(booking)))
        .merge(inventory_routes(Arc::new(inventory)));

    Router::new()
        .route("/", get(|| async { "Medicare booking API is running!" }))
        .nest("/api", api)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use shared_utils::test_utils::{json_request, read_json, TestConfig};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_root_and_nested_routes() {
        let app = create_router(TestConfig::default().to_arc());

        let response = app.clone().oneshot(json_request(Method::GET, "/", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/pharmacies",
                Some(json!({ "pharmacy_name": "Apollo", "pincode": 560001, "contact": "080" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(json_request(Method::GET, "/api/pharmacies/search?pincode=560001", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await["results"][0]["pharmacy_id"], "PH1");
    }

    #[tokio::test]
    async fn test_search_requires_pincode() {
        let app = create_router(TestConfig::default().to_arc());

        let response = app
            .oneshot(json_request(Method::GET, "/api/hospitals/search", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await["error"], "Pincode is required");
    }
}
