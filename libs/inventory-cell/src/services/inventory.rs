use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use facility_cell::Pharmacy;
use shared_database::Table;
use shared_utils::generate_id;

use crate::models::{
    max_price, CreateManufacturerRequest, CreateMedicineRequest, CreateStockRequest, InventoryError, Manufacturer,
    Medicine, PharmacyMedicine, StockFilters, MANUFACTURER_ID_PREFIX, MEDICINE_ID_PREFIX, PRICE_SCALE,
    STOCK_ID_PREFIX,
};

/// Medicine and manufacturer catalogues plus per-pharmacy stock.
pub struct InventoryService {
    medicines: Arc<Table<Medicine>>,
    manufacturers: Arc<Table<Manufacturer>>,
    stock: Arc<Table<PharmacyMedicine>>,
    pharmacies: Arc<Table<Pharmacy>>,
}

impl InventoryService {
    pub fn new(
        medicines: Arc<Table<Medicine>>,
        manufacturers: Arc<Table<Manufacturer>>,
        stock: Arc<Table<PharmacyMedicine>>,
        pharmacies: Arc<Table<Pharmacy>>,
    ) -> Self {
        Self {
            medicines,
            manufacturers,
            stock,
            pharmacies,
        }
    }

    // ==============================================================================
    // CATALOGUE
    // ==============================================================================

    pub async fn create_medicine(&self, request: CreateMedicineRequest) -> Result<Medicine, InventoryError> {
        require(&request.medicine_name, "medicine_name")?;
        require(&request.dosage_form, "dosage_form")?;

        let medicine = self
            .medicines
            .insert_with(|existing| {
                let medicine_id = generate_id(existing.iter().map(|m| m.medicine_id.as_str()), MEDICINE_ID_PREFIX);
                Ok::<_, InventoryError>(Medicine {
                    medicine_id,
                    medicine_name: request.medicine_name,
                    description: request.description,
                    dosage_form: request.dosage_form,
                })
            })
            .await?;

        info!("Added medicine {} ({})", medicine.medicine_id, medicine.medicine_name);
        Ok(medicine)
    }

    pub async fn get_medicine(&self, medicine_id: &str) -> Result<Medicine, InventoryError> {
        self.medicines
            .get(medicine_id)
            .await
            .ok_or(InventoryError::MedicineNotFound)
    }

    pub async fn list_medicines(&self) -> Vec<Medicine> {
        self.medicines.all().await
    }

    pub async fn create_manufacturer(&self, request: CreateManufacturerRequest) -> Result<Manufacturer, InventoryError> {
        require(&request.manufacturer_name, "manufacturer_name")?;

        let manufacturer = self
            .manufacturers
            .insert_with(|existing| {
                let manufacturer_id = generate_id(
                    existing.iter().map(|m| m.manufacturer_id.as_str()),
                    MANUFACTURER_ID_PREFIX,
                );
                Ok::<_, InventoryError>(Manufacturer {
                    manufacturer_id,
                    manufacturer_name: request.manufacturer_name,
                })
            })
            .await?;

        info!("Added manufacturer {}", manufacturer.manufacturer_id);
        Ok(manufacturer)
    }

    pub async fn list_manufacturers(&self) -> Vec<Manufacturer> {
        self.manufacturers.all().await
    }

    // ==============================================================================
    // STOCK
    // ==============================================================================

    /// Records a stock entry after checking all three references exist.
    pub async fn add_stock(&self, request: CreateStockRequest) -> Result<PharmacyMedicine, InventoryError> {
        validate_price(request.price)?;
        if request.stock_quantity < 0 {
            return Err(InventoryError::ValidationError(
                "stock_quantity must not be negative".to_string(),
            ));
        }

        if !self.pharmacies.contains(&request.pharmacy_id).await {
            warn!("Stock rejected, unknown pharmacy {}", request.pharmacy_id);
            return Err(InventoryError::PharmacyNotFound);
        }
        if !self.medicines.contains(&request.medicine_id).await {
            return Err(InventoryError::MedicineNotFound);
        }
        if !self.manufacturers.contains(&request.manufacturer_id).await {
            return Err(InventoryError::ManufacturerNotFound);
        }

        let entry = self
            .stock
            .insert_with(|existing| {
                let medicine_instance_id = generate_id(
                    existing.iter().map(|s| s.medicine_instance_id.as_str()),
                    STOCK_ID_PREFIX,
                );
                Ok::<_, InventoryError>(PharmacyMedicine {
                    medicine_instance_id,
                    pharmacy_id: request.pharmacy_id,
                    medicine_id: request.medicine_id,
                    manufacturer_id: request.manufacturer_id,
                    price: request.price,
                    stock_quantity: request.stock_quantity,
                    expiry_date: request.expiry_date,
                    is_available: request.is_available,
                })
            })
            .await?;

        info!(
            "Pharmacy {} stocks {} as {}",
            entry.pharmacy_id, entry.medicine_id, entry.medicine_instance_id
        );
        Ok(entry)
    }

    pub async fn get_stock(&self, medicine_instance_id: &str) -> Result<PharmacyMedicine, InventoryError> {
        self.stock
            .get(medicine_instance_id)
            .await
            .ok_or(InventoryError::StockNotFound)
    }

    pub async fn list_stock(&self, filters: &StockFilters) -> Vec<PharmacyMedicine> {
        debug!("Listing stock with filters {:?}", filters);
        self.stock.filter(|entry| filters.matches(entry)).await
    }
}

fn require(value: &str, field: &str) -> Result<(), InventoryError> {
    if value.trim().is_empty() {
        return Err(InventoryError::ValidationError(format!("{} must not be empty", field)));
    }
    Ok(())
}

fn validate_price(price: Decimal) -> Result<(), InventoryError> {
    if price.is_sign_negative() {
        return Err(InventoryError::ValidationError("price must not be negative".to_string()));
    }
    if price.normalize().scale() > PRICE_SCALE {
        return Err(InventoryError::ValidationError(format!(
            "price allows at most {} decimal places",
            PRICE_SCALE
        )));
    }
    if price > max_price() {
        return Err(InventoryError::ValidationError(format!("price must not exceed {}", max_price())));
    }
    Ok(())
}
