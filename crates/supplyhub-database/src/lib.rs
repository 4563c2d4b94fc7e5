//! # supplyhub-database
//!
//! Persistence for SupplyHub. The [`store`] module defines one trait per
//! aggregate; [`repositories`] implements them on PostgreSQL and [`memory`]
//! implements them on process-local maps. [`Stores`] bundles one of each
//! for dependency injection.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

use std::sync::Arc;

pub use connection::DatabasePool;
pub use store::{
    DatasetStore, IntegrationQuery, InventoryStore, NotificationStore, UserStore,
    WarehouseStore, WebhookDeliveryStore,
};

/// One instance of every store, shared across services.
#[derive(Debug, Clone)]
pub struct Stores {
    pub notifications: Arc<dyn NotificationStore>,
    pub users: Arc<dyn UserStore>,
    pub inventory: Arc<dyn InventoryStore>,
    pub warehouses: Arc<dyn WarehouseStore>,
    pub datasets: Arc<dyn DatasetStore>,
    pub deliveries: Arc<dyn WebhookDeliveryStore>,
}

impl Stores {
    /// Stores backed by a PostgreSQL pool.
    pub fn postgres(db: &DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            notifications: Arc::new(repositories::NotificationRepository::new(pool.clone())),
            users: Arc::new(repositories::UserRepository::new(pool.clone())),
            inventory: Arc::new(repositories::InventoryRepository::new(pool.clone())),
            warehouses: Arc::new(repositories::WarehouseRepository::new(pool.clone())),
            datasets: Arc::new(repositories::DatasetRepository::new(pool.clone())),
            deliveries: Arc::new(repositories::WebhookDeliveryRepository::new(pool)),
        }
    }

    /// Stores backed by process-local maps.
    pub fn memory() -> Self {
        Self {
            notifications: Arc::new(memory::MemoryNotificationStore::default()),
            users: Arc::new(memory::MemoryUserStore::default()),
            inventory: Arc::new(memory::MemoryInventoryStore::default()),
            warehouses: Arc::new(memory::MemoryWarehouseStore::default()),
            datasets: Arc::new(memory::MemoryDatasetStore::default()),
            deliveries: Arc::new(memory::MemoryWebhookDeliveryStore::default()),
        }
    }
}
