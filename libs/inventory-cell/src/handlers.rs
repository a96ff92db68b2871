use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::{CreateManufacturerRequest, CreateMedicineRequest, CreateStockRequest, StockFilters};
use crate::services::InventoryService;

#[axum::debug_handler]
pub async fn create_medicine(
    State(service): State<Arc<InventoryService>>,
    Json(request): Json<CreateMedicineRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let medicine = service.create_medicine(request).await?;
    Ok((StatusCode::CREATED, Json(json!(medicine))))
}

#[axum::debug_handler]
pub async fn list_medicines(State(service): State<Arc<InventoryService>>) -> Result<Json<Value>, AppError> {
    let medicines = service.list_medicines().await;
    Ok(Json(json!({ "medicines": medicines, "total": medicines.len() })))
}

#[axum::debug_handler]
pub async fn get_medicine(
    State(service): State<Arc<InventoryService>>,
    Path(medicine_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let medicine = service.get_medicine(&medicine_id).await?;
    Ok(Json(json!(medicine)))
}

#[axum::debug_handler]
pub async fn create_manufacturer(
    State(service): State<Arc<InventoryService>>,
    Json(request): Json<CreateManufacturerRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let manufacturer = service.create_manufacturer(request).await?;
    Ok((StatusCode::CREATED, Json(json!(manufacturer))))
}

#[axum::debug_handler]
pub async fn list_manufacturers(State(service): State<Arc<InventoryService>>) -> Result<Json<Value>, AppError> {
    let manufacturers = service.list_manufacturers().await;
    Ok(Json(json!({ "manufacturers": manufacturers })))
}

#[axum::debug_handler]
pub async fn add_stock(
    State(service): State<Arc<InventoryService>>,
    Json(request): Json<CreateStockRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let entry = service.add_stock(request).await?;
    Ok((StatusCode::CREATED, Json(json!(entry))))
}

#[axum::debug_handler]
pub async fn list_stock(
    State(service): State<Arc<InventoryService>>,
    Query(filters): Query<StockFilters>,
) -> Result<Json<Value>, AppError> {
    let stock = service.list_stock(&filters).await;
    Ok(Json(json!({ "stock": stock, "total": stock.len() })))
}

#[axum::debug_handler]
pub async fn get_stock(
    State(service): State<Arc<InventoryService>>,
    Path(medicine_instance_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let entry = service.get_stock(&medicine_instance_id).await?;
    Ok(Json(json!(entry)))
}
