use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::services::FacilityService;

pub fn facility_routes(state: Arc<FacilityService>) -> Router {
    Router::new()
        .route("/hospitals", get(handlers::list_hospitals).post(handlers::create_hospital))
        .route("/hospitals/search", get(handlers::search_hospitals))
        .route("/hospitals/{hospital_id}", get(handlers::get_hospital))
        .route("/pharmacies", get(handlers::list_pharmacies).post(handlers::create_pharmacy))
        .route("/pharmacies/search", get(handlers::search_pharmacies))
        .route("/pharmacies/{pharmacy_id}", get(handlers::get_pharmacy))
        .with_state(state)
}
