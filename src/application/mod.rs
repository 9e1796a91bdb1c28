//! Application layer with services, use cases and DTOs.

/// Data transfer objects.
pub mod dto;
/// Session, menu and routing services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{InboundRequest, ProxyResponse};
pub use services::{MenuReconciler, ProxyRouter, SessionState, SessionStore};
pub use use_cases::ProxyUseCase;
