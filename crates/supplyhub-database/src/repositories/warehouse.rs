//! Warehouse repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use supplyhub_core::error::{AppError, ErrorKind};
use supplyhub_core::result::AppResult;
use supplyhub_core::types::{UserId, WarehouseId};
use supplyhub_entity::warehouse::{TemperatureReading, Warehouse, Zone};

use crate::store::WarehouseStore;

#[derive(Debug, FromRow)]
struct WarehouseRow {
    id: WarehouseId,
    user_id: UserId,
    name: String,
}

#[derive(Debug, FromRow)]
struct ZoneRow {
    name: String,
    sensor_id: Option<String>,
    current_temperature: Option<f64>,
    last_temperature: Option<f64>,
    last_reading_at: Option<DateTime<Utc>>,
}

impl From<ZoneRow> for Zone {
    fn from(row: ZoneRow) -> Self {
        let last_reading = match (row.last_temperature, row.last_reading_at) {
            (Some(temperature), Some(recorded_at)) => Some(TemperatureReading {
                temperature,
                recorded_at,
            }),
            _ => None,
        };
        Zone {
            name: row.name,
            sensor_id: row.sensor_id,
            current_temperature: row.current_temperature,
            last_reading,
        }
    }
}

/// PostgreSQL-backed [`WarehouseStore`]. Zones live in `warehouse_zones`.
#[derive(Debug, Clone)]
pub struct WarehouseRepository {
    pool: PgPool,
}

impl WarehouseRepository {
    /// Create a new warehouse repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_zones(&self, warehouse_id: WarehouseId) -> AppResult<Vec<Zone>> {
        let rows = sqlx::query_as::<_, ZoneRow>(
            "SELECT name, sensor_id, current_temperature, last_temperature, last_reading_at \
             FROM warehouse_zones WHERE warehouse_id = $1 ORDER BY position, name",
        )
        .bind(warehouse_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load zones", e))?;
        Ok(rows.into_iter().map(Zone::from).collect())
    }
}

#[async_trait]
impl WarehouseStore for WarehouseRepository {
    async fn insert(&self, warehouse: Warehouse) -> AppResult<Warehouse> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e))?;

        sqlx::query("INSERT INTO warehouses (id, user_id, name) VALUES ($1, $2, $3)")
            .bind(warehouse.id)
            .bind(warehouse.user_id)
            .bind(&warehouse.name)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create warehouse", e))?;

        for (position, zone) in warehouse.zones.iter().enumerate() {
            sqlx::query(
                "INSERT INTO warehouse_zones \
                 (warehouse_id, name, position, sensor_id, current_temperature, last_temperature, last_reading_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
            )
            .bind(warehouse.id)
            .bind(&zone.name)
            .bind(position as i32)
            .bind(&zone.sensor_id)
            .bind(zone.current_temperature)
            .bind(zone.last_reading.map(|r| r.temperature))
            .bind(zone.last_reading.map(|r| r.recorded_at))
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create zone", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit warehouse", e))?;
        Ok(warehouse)
    }

    async fn find_by_id(&self, id: WarehouseId) -> AppResult<Option<Warehouse>> {
        let row = sqlx::query_as::<_, WarehouseRow>(
            "SELECT id, user_id, name FROM warehouses WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find warehouse", e))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let zones = self.load_zones(row.id).await?;
        Ok(Some(Warehouse {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            zones,
        }))
    }

    async fn record_temperature(
        &self,
        user_id: UserId,
        warehouse_id: WarehouseId,
        sensor_id: &str,
        reading: TemperatureReading,
    ) -> AppResult<Option<Warehouse>> {
        let updated = sqlx::query(
            "UPDATE warehouse_zones z \
             SET current_temperature = $4, last_temperature = $4, last_reading_at = $5 \
             FROM warehouses w \
             WHERE z.warehouse_id = w.id AND w.id = $1 AND w.user_id = $2 AND z.sensor_id = $3",
        )
        .bind(warehouse_id)
        .bind(user_id)
        .bind(sensor_id)
        .bind(reading.temperature)
        .bind(reading.recorded_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record temperature", e))?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(warehouse_id).await
    }
}
