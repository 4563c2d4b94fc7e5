//! # supplyhub-entity
//!
//! Domain entity models for SupplyHub. Structs here are either persisted
//! records (notifications, users with their integration registrations,
//! inventory items, warehouses, BI datasets, webhook deliveries) or the
//! value objects those records carry.

pub mod dataset;
pub mod integration;
pub mod inventory;
pub mod notification;
pub mod user;
pub mod warehouse;
pub mod webhook;
