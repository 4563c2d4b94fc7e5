//! Route handlers organized by domain.

pub mod health;
pub mod integration;
pub mod notification;
pub mod webhook;
