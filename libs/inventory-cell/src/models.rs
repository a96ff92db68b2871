use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_database::{Record, StoreError};
use shared_models::error::AppError;

pub const MEDICINE_ID_PREFIX: &str = "MED";
pub const MANUFACTURER_ID_PREFIX: &str = "M";
pub const STOCK_ID_PREFIX: &str = "PHME";

/// Prices carry at most 10 digits, 2 of them after the point.
pub const PRICE_SCALE: u32 = 2;

pub fn max_price() -> Decimal {
    Decimal::new(9_999_999_999, PRICE_SCALE)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medicine {
    pub medicine_id: String,
    pub medicine_name: String,
    pub description: String,
    pub dosage_form: String,
}

impl Record for Medicine {
    fn key(&self) -> &str {
        &self.medicine_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manufacturer {
    pub manufacturer_id: String,
    pub manufacturer_name: String,
}

impl Record for Manufacturer {
    fn key(&self) -> &str {
        &self.manufacturer_id
    }
}

/// One medicine from one manufacturer as stocked by one pharmacy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PharmacyMedicine {
    pub medicine_instance_id: String,
    pub pharmacy_id: String,
    pub medicine_id: String,
    pub manufacturer_id: String,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub expiry_date: NaiveDate,
    pub is_available: bool,
}

impl Record for PharmacyMedicine {
    fn key(&self) -> &str {
        &self.medicine_instance_id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMedicineRequest {
    pub medicine_name: String,
    #[serde(default)]
    pub description: String,
    pub dosage_form: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateManufacturerRequest {
    pub manufacturer_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStockRequest {
    pub pharmacy_id: String,
    pub medicine_id: String,
    pub manufacturer_id: String,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub expiry_date: NaiveDate,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StockFilters {
    pub pharmacy_id: Option<String>,
    pub medicine_id: Option<String>,
}

impl StockFilters {
    pub fn matches(&self, entry: &PharmacyMedicine) -> bool {
        self.pharmacy_id.as_ref().map_or(true, |id| &entry.pharmacy_id == id)
            && self.medicine_id.as_ref().map_or(true, |id| &entry.medicine_id == id)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InventoryError {
    #[error("Medicine not found")]
    MedicineNotFound,

    #[error("Manufacturer not found")]
    ManufacturerNotFound,

    #[error("Pharmacy not found")]
    PharmacyNotFound,

    #[error("Stock entry not found")]
    StockNotFound,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<InventoryError> for AppError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::MedicineNotFound
            | InventoryError::ManufacturerNotFound
            | InventoryError::PharmacyNotFound
            | InventoryError::StockNotFound => AppError::NotFound(err.to_string()),
            InventoryError::ValidationError(msg) => AppError::ValidationError(msg),
            InventoryError::Store(e) => AppError::Conflict(e.to_string()),
        }
    }
}
