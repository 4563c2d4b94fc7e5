//! In-memory warehouse store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use supplyhub_core::result::AppResult;
use supplyhub_core::types::{UserId, WarehouseId};
use supplyhub_entity::warehouse::{TemperatureReading, Warehouse};

use crate::store::WarehouseStore;

/// In-memory [`WarehouseStore`].
#[derive(Debug, Default)]
pub struct MemoryWarehouseStore {
    warehouses: RwLock<HashMap<WarehouseId, Warehouse>>,
}

#[async_trait]
impl WarehouseStore for MemoryWarehouseStore {
    async fn insert(&self, warehouse: Warehouse) -> AppResult<Warehouse> {
        self.warehouses
            .write()
            .await
            .insert(warehouse.id, warehouse.clone());
        Ok(warehouse)
    }

    async fn find_by_id(&self, id: WarehouseId) -> AppResult<Option<Warehouse>> {
        Ok(self.warehouses.read().await.get(&id).cloned())
    }

    async fn record_temperature(
        &self,
        user_id: UserId,
        warehouse_id: WarehouseId,
        sensor_id: &str,
        reading: TemperatureReading,
    ) -> AppResult<Option<Warehouse>> {
        let mut guard = self.warehouses.write().await;
        let Some(warehouse) = guard
            .get_mut(&warehouse_id)
            .filter(|w| w.user_id == user_id)
        else {
            return Ok(None);
        };
        let Some(zone) = warehouse
            .zones
            .iter_mut()
            .find(|zone| zone.sensor_id.as_deref() == Some(sensor_id))
        else {
            return Ok(None);
        };
        zone.current_temperature = Some(reading.temperature);
        zone.last_reading = Some(reading);
        Ok(Some(warehouse.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use supplyhub_entity::warehouse::Zone;

    fn warehouse(user_id: UserId) -> Warehouse {
        Warehouse {
            id: WarehouseId::new(),
            user_id,
            name: "Central".into(),
            zones: vec![Zone {
                name: "Freezer".into(),
                sensor_id: Some("S-1".into()),
                current_temperature: Some(-18.0),
                last_reading: None,
            }],
        }
    }

    #[tokio::test]
    async fn test_reading_updates_matching_zone() {
        let store = MemoryWarehouseStore::default();
        let owner = UserId::new();
        let w = store.insert(warehouse(owner)).await.unwrap();
        let reading = TemperatureReading {
            temperature: -12.5,
            recorded_at: Utc::now(),
        };

        let updated = store
            .record_temperature(owner, w.id, "S-1", reading)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.zones[0].current_temperature, Some(-12.5));
        assert_eq!(updated.zones[0].last_reading, Some(reading));
    }

    #[tokio::test]
    async fn test_unknown_sensor_leaves_warehouse_untouched() {
        let store = MemoryWarehouseStore::default();
        let owner = UserId::new();
        let w = store.insert(warehouse(owner)).await.unwrap();
        let reading = TemperatureReading {
            temperature: 30.0,
            recorded_at: Utc::now(),
        };

        assert!(store
            .record_temperature(owner, w.id, "S-404", reading)
            .await
            .unwrap()
            .is_none());
        assert!(store
            .record_temperature(UserId::new(), w.id, "S-1", reading)
            .await
            .unwrap()
            .is_none());
        assert_eq!(store.find_by_id(w.id).await.unwrap(), Some(w));
    }
}
