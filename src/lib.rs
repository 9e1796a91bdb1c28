//! Portico - session-aware navigation menu and development reverse proxy.
//!
//! This crate provides the behavioral core of a single-page application
//! shell: a persisted session flag that drives the navigation menu, and an
//! ordered rule table that denies or forwards API requests during
//! development.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing services, use cases and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer rendering menus for the command line.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "portico";
