//! Utility functions for showroom.
//!
//! - [`text`]: String helpers (HTML escaping, digit projection, blank checks).

pub mod text;
