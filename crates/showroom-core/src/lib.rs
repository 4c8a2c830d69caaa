//! # showroom-core
//!
//! Core types, settings, and error types shared by the showroom crates.
//! This crate has no framework dependencies and provides the foundation the
//! contact form controller is built on.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`utils`] - Text helpers (HTML escaping, digit projection)
//! - [`settings`] - Contact form configuration with fixed defaults
//! - [`settings_loader`] - Loading settings from TOML, JSON, and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;
pub mod utils;

// Re-export the most commonly used types at the crate root.
pub use error::{ShowroomError, ShowroomResult, ValidationError};
pub use settings::{ContactSettings, CountrySettings, Settings};
