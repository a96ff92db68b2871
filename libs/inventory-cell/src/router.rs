use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::services::InventoryService;

pub fn inventory_routes(service: Arc<InventoryService>) -> Router {
    Router::new()
        .route("/medicines", get(handlers::list_medicines).post(handlers::create_medicine))
        .route("/medicines/{medicine_id}", get(handlers::get_medicine))
        .route(
            "/manufacturers",
            get(handlers::list_manufacturers).post(handlers::create_manufacturer),
        )
        .route("/pharmacy-stock", get(handlers::list_stock).post(handlers::add_stock))
        .route("/pharmacy-stock/{medicine_instance_id}", get(handlers::get_stock))
        .with_state(service)
}
