//! # supplyhub-service
//!
//! Business logic service layer for SupplyHub. Services orchestrate the
//! stores from `supplyhub-database` and the verifiers from `supplyhub-auth`
//! to implement notification management, domain mutations, integration
//! lookup, and the inbound webhook pipeline.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod dataset;
pub mod integration;
pub mod inventory;
pub mod notification;
pub mod retention;
pub mod warehouse;
pub mod webhook;

pub use context::RequestContext;
pub use dataset::DatasetService;
pub use integration::{IntegrationLocator, IntegrationSettingsService};
pub use inventory::InventoryService;
pub use notification::{NotificationEmitter, NotificationService};
pub use retention::{RetentionReport, RetentionTask};
pub use warehouse::WarehouseService;
pub use webhook::{WebhookOutcome, WebhookProcessor, WebhookRequest, WebhookStage};
