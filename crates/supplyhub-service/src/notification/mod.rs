//! Notification creation and per-user notification management.

pub mod emitter;
pub mod service;

pub use emitter::NotificationEmitter;
pub use service::NotificationService;
