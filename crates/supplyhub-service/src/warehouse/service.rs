//! Zone temperature updates keyed by sensor id.

use std::sync::Arc;

use tracing::{debug, info};

use supplyhub_core::error::AppError;
use supplyhub_core::result::AppResult;
use supplyhub_core::types::{UserId, WarehouseId};
use supplyhub_database::WarehouseStore;
use supplyhub_entity::warehouse::{TemperatureReading, Warehouse};

/// Records sensor readings on warehouse zones.
#[derive(Debug, Clone)]
pub struct WarehouseService {
    store: Arc<dyn WarehouseStore>,
}

impl WarehouseService {
    /// Creates a new warehouse service.
    pub fn new(store: Arc<dyn WarehouseStore>) -> Self {
        Self { store }
    }

    /// Look up a warehouse by id regardless of owner.
    pub async fn find(&self, id: WarehouseId) -> AppResult<Option<Warehouse>> {
        self.store.find_by_id(id).await
    }

    /// Record a reading on the zone bound to `sensor_id`.
    ///
    /// Only that zone changes. `None` means the warehouse is not owned by
    /// `user_id` or has no zone for the sensor, and nothing was written.
    pub async fn record_temperature(
        &self,
        user_id: UserId,
        warehouse_id: WarehouseId,
        sensor_id: &str,
        reading: TemperatureReading,
    ) -> AppResult<Option<Warehouse>> {
        if !reading.temperature.is_finite() {
            return Err(AppError::validation("temperature must be a finite number"));
        }

        let updated = self
            .store
            .record_temperature(user_id, warehouse_id, sensor_id, reading)
            .await?;
        match &updated {
            Some(_) => info!(
                warehouse_id = %warehouse_id,
                sensor_id,
                temperature = reading.temperature,
                "Zone temperature recorded"
            ),
            None => debug!(warehouse_id = %warehouse_id, sensor_id, "No zone bound to sensor"),
        }
        Ok(updated)
    }
}
